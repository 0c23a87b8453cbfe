//! Report generation: CSV table plus bar chart.

use std::path::Path;

use focal_stats_core::domain::{CHART_FILE_NAME, TABLE_FILE_NAME};
use focal_stats_core::{ChartSpec, ReportArtifacts, ScanResult};
use tracing::{info, warn};

use crate::chart::{ChartOptions, ChartRenderer};
use crate::table::write_table;

/// Writes the frequency table and chart for a scan result.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    renderer: ChartRenderer,
}

impl ReportGenerator {
    #[must_use]
    pub const fn new(chart: ChartOptions) -> Self {
        Self {
            renderer: ChartRenderer::new(chart),
        }
    }

    /// Writes `focal_length_stats.csv` and `focal_length_chart.png` into
    /// `output_dir`.
    ///
    /// Never fails: an empty result writes nothing, and a failed write is
    /// logged and leaves that artifact out. A table failure does not stop the
    /// chart from being written.
    #[must_use]
    pub fn generate(&self, result: &ScanResult, output_dir: &Path) -> ReportArtifacts {
        let counts = result.focal_counts();
        let Some(spec) = ChartSpec::from_counts(counts) else {
            warn!(
                "No images with focal length data found; nothing written to {}",
                output_dir.display()
            );
            return ReportArtifacts::none();
        };

        let table_path = output_dir.join(TABLE_FILE_NAME);
        let table = match write_table(&table_path, &counts.sorted()) {
            Ok(()) => {
                info!("Wrote table {}", table_path.display());
                Some(table_path)
            }
            Err(e) => {
                warn!("{e:#}");
                None
            }
        };

        let chart_path = output_dir.join(CHART_FILE_NAME);
        let chart = match self.renderer.write_png(&spec, &chart_path) {
            Ok(()) => {
                info!("Wrote chart {}", chart_path.display());
                Some(chart_path)
            }
            Err(e) => {
                warn!("{e:#}");
                None
            }
        };

        ReportArtifacts { table, chart }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use focal_stats_core::{FocalCounts, FocalLength};

    use super::*;

    fn result_of(values: &[(f64, usize)], missing: usize) -> ScanResult {
        let counts: FocalCounts = values
            .iter()
            .map(|(mm, n)| (FocalLength::new(*mm).unwrap(), *n))
            .collect();
        ScanResult::new(counts, missing)
    }

    fn small_chart() -> ReportGenerator {
        ReportGenerator::new(ChartOptions {
            width_in: 3.0,
            height_in: 2.0,
            ..ChartOptions::default()
        })
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = small_chart().generate(&result_of(&[], 5), dir.path());

        assert!(artifacts.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let result = result_of(&[(24.0, 3), (50.0, 7), (35.0, 2)], 0);

        let artifacts = small_chart().generate(&result, dir.path());

        let table = artifacts.table.unwrap();
        assert_eq!(table, dir.path().join("focal_length_stats.csv"));
        assert_eq!(
            fs::read_to_string(&table).unwrap(),
            "Focal Length (mm),Count\n24.0,3\n35.0,2\n50.0,7\n"
        );
        let chart = artifacts.chart.unwrap();
        assert_eq!(chart, dir.path().join("focal_length_chart.png"));
        assert!(fs::read(chart).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_rerun_overwrites_identical_table() {
        let dir = tempfile::tempdir().unwrap();
        let result = result_of(&[(85.0, 1), (24.1, 4)], 2);
        let generator = small_chart();

        let first = generator.generate(&result, dir.path());
        let first_bytes = fs::read(first.table.unwrap()).unwrap();
        let second = generator.generate(&result, dir.path());
        let second_bytes = fs::read(second.table.unwrap()).unwrap();

        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_table_failure_keeps_chart() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the table file should go makes the write fail
        fs::create_dir(dir.path().join(TABLE_FILE_NAME)).unwrap();

        let artifacts = small_chart().generate(&result_of(&[(50.0, 1)], 0), dir.path());

        assert!(artifacts.table.is_none());
        assert!(artifacts.chart.is_some());
    }

    #[test]
    fn test_chart_failure_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(CHART_FILE_NAME)).unwrap();

        let artifacts = small_chart().generate(&result_of(&[(50.0, 1)], 0), dir.path());

        assert!(artifacts.table.is_some());
        assert!(artifacts.chart.is_none());
    }
}
