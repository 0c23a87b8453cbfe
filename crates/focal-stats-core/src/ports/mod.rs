//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the scanner and the adapters
//! that touch the filesystem and decode metadata.

mod focal_reader;
mod image_source;
mod progress;

pub use focal_reader::{FocalLengthReader, FocalLookup};
pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
