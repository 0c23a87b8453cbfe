//! Core domain types for focal-length statistics.

mod focal;
mod report;
mod scan;

pub use focal::{FocalLength, FocalLengthError};
pub use report::{ReportArtifacts, CHART_FILE_NAME, TABLE_FILE_NAME};
pub use scan::{FocalCounts, ScanResult};
