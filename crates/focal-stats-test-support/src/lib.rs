//! Test support utilities for focal-stats.
//!
//! Provides fixture builders for image files with and without embedded
//! EXIF, and mocks of the core ports.
//!
//! # Example
//!
//! ```
//! use focal_stats_test_support::ExifImageBuilder;
//!
//! let jpeg = ExifImageBuilder::new()
//!     .focal_length(241, 10)
//!     .focal_length_35mm(36)
//!     .build()
//!     .unwrap();
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! ```

mod builders;
mod mocks;

pub use builders::{plain_jpeg, plain_png, ExifImageBuilder, PhotoTree};
pub use mocks::{MockFocalReader, MockImageSource, MockProgressSink};
