//! CLI command definitions and handlers.

pub mod scan;

use clap::Parser;

/// Focal Stats - Tally the focal lengths recorded in your photos
#[derive(Parser)]
#[command(name = "focal-stats")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: focal-stats ~/Photos/2023 ~/Photos/2024 ./focal-report")]
pub struct Cli {
    /// Scan arguments (directories, chart options, flags).
    #[command(flatten)]
    pub scan: scan::ScanArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan and report completed (including when no focal lengths were found).
    Success = 0,
    /// Unexpected failure.
    Error = 1,
    /// An input or output directory failed validation.
    InvalidInput = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
