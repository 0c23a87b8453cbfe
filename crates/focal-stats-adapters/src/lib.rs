//! Focal Stats Adapters - External adapters for focal-stats.
//!
//! This crate provides adapters for:
//! - Filesystem image discovery
//! - EXIF focal length extraction
//! - CSV table and PNG chart output

pub mod chart;
pub mod fs;
pub mod metadata;
pub mod report;
pub mod table;

pub use chart::{ChartOptions, ChartRenderer};
pub use fs::FsImageSource;
pub use metadata::ExifFocalReader;
pub use report::ReportGenerator;
