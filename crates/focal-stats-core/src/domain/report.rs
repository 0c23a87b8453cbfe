//! Report artifact types.

use std::path::PathBuf;

/// File name of the frequency table written into the output directory.
pub const TABLE_FILE_NAME: &str = "focal_length_stats.csv";

/// File name of the bar chart written into the output directory.
pub const CHART_FILE_NAME: &str = "focal_length_chart.png";

/// Paths of the artifacts a report run produced.
///
/// A path is `None` when there was nothing to report or when writing that
/// artifact failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportArtifacts {
    /// The CSV frequency table.
    pub table: Option<PathBuf>,
    /// The PNG bar chart.
    pub chart: Option<PathBuf>,
}

impl ReportArtifacts {
    /// No artifacts.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            table: None,
            chart: None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.table.is_none() && self.chart.is_none()
    }
}
