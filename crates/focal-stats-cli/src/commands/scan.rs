//! Scan command - tally focal lengths and write the report.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use focal_stats_adapters::{ChartOptions, ExifFocalReader, FsImageSource, ReportGenerator};
use focal_stats_core::{scan_images, ImageSource, ReportArtifacts, ScanResult};
use tracing::{debug, info};

use crate::config::{is_hex_color, is_valid_inches, AppConfig};
use crate::output::{write_summary, ProgressBar};
use crate::validate::{prepare_output_dir, validate_input_dirs};

/// Parse a figure dimension in inches.
fn parse_inches(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if is_valid_inches(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not a usable size in inches"))
    }
}

/// Parse a `#rrggbb` colour.
fn parse_hex_color(s: &str) -> Result<String, String> {
    if is_hex_color(s) {
        Ok(s.to_ascii_lowercase())
    } else {
        Err(format!("'{s}' is not a #rrggbb colour"))
    }
}

/// Arguments for a scan.
#[derive(Args, Clone, Debug)]
pub struct ScanArgs {
    /// Input directories followed by the output directory
    #[arg(value_name = "DIR", required = true, num_args = 2..)]
    pub directories: Vec<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show progress bar even when stderr is not a terminal
    #[arg(long)]
    pub progress: bool,

    /// Chart width in inches
    #[arg(long, value_name = "INCHES", value_parser = parse_inches)]
    pub chart_width: Option<f64>,

    /// Chart height in inches
    #[arg(long, value_name = "INCHES", value_parser = parse_inches)]
    pub chart_height: Option<f64>,

    /// Bar colour as #rrggbb
    #[arg(long, value_name = "HEX", value_parser = parse_hex_color)]
    pub bar_color: Option<String>,
}

impl ScanArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in [`ChartOptions::default`])
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.chart_width = args.chart_width.or(config.chart.width);
        args.chart_height = args.chart_height.or(config.chart.height);
        if args.bar_color.is_none() {
            args.bar_color.clone_from(&config.chart.bar_color);
        }

        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Chart options with fallback to hardcoded defaults.
    pub fn chart_options(&self) -> ChartOptions {
        let defaults = ChartOptions::default();
        ChartOptions {
            width_in: self.chart_width.unwrap_or(defaults.width_in),
            height_in: self.chart_height.unwrap_or(defaults.height_in),
            bar_color: self.bar_color.clone().unwrap_or(defaults.bar_color),
        }
    }

    /// Splits the positional directories into inputs and the output.
    fn split_directories(&self) -> Result<(&[PathBuf], &PathBuf)> {
        match self.directories.split_last() {
            Some((output, inputs)) if !inputs.is_empty() => Ok((inputs, output)),
            _ => anyhow::bail!("At least one input directory and an output directory are required"),
        }
    }
}

/// Result of running the scan command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ScanOutcome {
    /// Counts gathered from the input directories.
    pub result: ScanResult,
    /// Files written to the output directory.
    pub artifacts: ReportArtifacts,
}

/// Run the scan command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ScanArgs) -> Result<ScanOutcome> {
    let (inputs, output) = args.split_directories()?;
    info!(
        "Scanning {} input directories into {}",
        inputs.len(),
        output.display()
    );

    validate_input_dirs(inputs)?;
    prepare_output_dir(output)?;

    let listing = inputs
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Analyzing directories: {listing}");

    let source = FsImageSource::new(inputs.to_vec());

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || io::stderr().is_terminal());
    let total = if show_progress { source.count_hint() } else { None };
    debug!("Progress bar: {show_progress}, total hint: {total:?}");

    let progress = ProgressBar::new(total.map(|t| t as u64), show_progress);
    let result = scan_images(&source, &ExifFocalReader::new(), &progress);

    let artifacts = ReportGenerator::new(args.chart_options()).generate(&result, output);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&mut out, &result, &artifacts).context("Failed to write summary")?;
    out.flush().context("Failed to flush stdout")?;

    Ok(ScanOutcome { result, artifacts })
}
