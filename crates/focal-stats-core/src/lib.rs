//! Focal Stats Core - Domain logic and the batch scanner
//!
//! This crate contains the focal-length domain types, the ports that connect
//! the scanner to the filesystem and metadata readers, and the pure chart
//! layout used by the report renderer.

pub mod chart;
pub mod domain;
pub mod ports;
pub mod scanner;

pub use chart::{tick_stride, ChartBar, ChartSpec, LABEL_ROTATION_DEGREES};
pub use domain::{FocalCounts, FocalLength, FocalLengthError, ReportArtifacts, ScanResult};
pub use ports::{FocalLengthReader, FocalLookup, ImageSource, ProgressEvent, ProgressSink};
pub use scanner::scan_images;
