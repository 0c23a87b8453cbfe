//! Focal Stats CLI - Which focal lengths do you shoot most?

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;
mod validate;

use commands::scan::ScanArgs;
use commands::{Cli, ExitCode};
use config::AppConfig;
use validate::ValidationError;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();
    let args = ScanArgs::with_config(cli.scan, &config);

    let exit_code = match commands::scan::run(&args) {
        Ok(_) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<ValidationError>().is_some() {
                ExitCode::InvalidInput
            } else {
                ExitCode::Error
            }
        }
    };

    exit_code.into()
}
