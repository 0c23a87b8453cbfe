//! End-of-run summary.

use std::io::{self, Write};

use focal_stats_core::{ReportArtifacts, ScanResult};

/// Writes the human-readable summary of a scan and its report.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_summary(
    out: &mut impl Write,
    result: &ScanResult,
    artifacts: &ReportArtifacts,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== Results =====")?;
    writeln!(out, "Total images scanned: {}", result.total_images())?;
    writeln!(out, "Images with focal length: {}", result.images_with_focal())?;
    writeln!(out, "Images missing EXIF data: {}", result.missing_exif())?;

    if !artifacts.is_empty() {
        writeln!(out)?;
    }
    if let Some(table) = &artifacts.table {
        writeln!(out, "Focal length table saved to: {}", table.display())?;
    }
    if let Some(chart) = &artifacts.chart {
        writeln!(out, "Distribution chart saved to: {}", chart.display())?;
    }

    if let Some((focal, count)) = result.focal_counts().most_common() {
        writeln!(out)?;
        writeln!(
            out,
            "Most common focal length: {focal}mm ({count} image{})",
            if count == 1 { "" } else { "s" }
        )?;
    }

    out.flush()
}
