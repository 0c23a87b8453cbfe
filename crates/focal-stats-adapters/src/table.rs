//! CSV frequency table output.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use focal_stats_core::FocalLength;

/// Header row of the frequency table.
pub const TABLE_HEADER: [&str; 2] = ["Focal Length (mm)", "Count"];

/// Renders `(focal length, count)` rows as CSV, header first, one row per
/// line in the order given.
#[must_use]
pub fn render_table(rows: &[(FocalLength, usize)]) -> String {
    let mut csv = TABLE_HEADER.join(",");
    csv.push('\n');
    for (focal, count) in rows {
        // writing into a String cannot fail
        let _ = writeln!(csv, "{focal},{count}");
    }
    csv
}

/// Writes the CSV table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_table(path: &Path, rows: &[(FocalLength, usize)]) -> Result<()> {
    fs::write(path, render_table(rows))
        .with_context(|| format!("Failed to write table {}", path.display()))
}
