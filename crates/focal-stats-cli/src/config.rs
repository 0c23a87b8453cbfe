//! Configuration file support for focal-stats.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/focal-stats/config.toml` (lowest priority)
//! - Project-local: `.focal-stats.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chart appearance.
    pub chart: ChartConfig,
    /// Terminal output settings.
    pub output: OutputConfig,
}

/// Chart configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Figure width in inches.
    pub width: Option<f64>,
    /// Figure height in inches.
    pub height: Option<f64>,
    /// Bar fill colour, `#rrggbb`.
    pub bar_color: Option<String>,
}

/// Terminal output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show progress bar even when stderr is not a terminal.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/focal-stats/config.toml`
    /// 2. Project-local: `.focal-stats.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as
    /// warnings and dropped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            warn!("Ignoring config value: {problem}");
        }

        config
    }

    /// Drops out-of-range values, returning a description of each.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(w) = self.chart.width.filter(|w| !is_valid_inches(*w)) {
            problems.push(format!("chart.width must be a positive number, got {w}"));
            self.chart.width = None;
        }
        if let Some(h) = self.chart.height.filter(|h| !is_valid_inches(*h)) {
            problems.push(format!("chart.height must be a positive number, got {h}"));
            self.chart.height = None;
        }
        if let Some(c) = self.chart.bar_color.take() {
            if is_hex_color(&c) {
                self.chart.bar_color = Some(c);
            } else {
                problems.push(format!("chart.bar_color must look like '#87ceeb', got '{c}'"));
            }
        }

        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.chart.width = other.chart.width.or(self.chart.width);
        self.chart.height = other.chart.height.or(self.chart.height);
        self.chart.bar_color = other.chart.bar_color.or_else(|| self.chart.bar_color.take());

        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Largest accepted figure dimension, in inches.
const MAX_INCHES: f64 = 100.0;

/// Whether `inches` is a usable figure dimension.
pub fn is_valid_inches(inches: f64) -> bool {
    inches.is_finite() && inches > 0.0 && inches <= MAX_INCHES
}

/// Whether `color` is a `#rrggbb` hex colour.
pub fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("focal-stats").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.focal-stats.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".focal-stats.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
