//! Progress bar adapter using indicatif.

use focal_stats_core::{ProgressEvent, ProgressSink};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};

/// Progress bar adapter for CLI output.
pub struct ProgressBar {
    bar: Option<IndicatifBar>,
}

impl ProgressBar {
    /// Creates a new progress bar.
    ///
    /// # Arguments
    ///
    /// * `total` - Total number of images, if known
    /// * `show_bar` - If false, all events are ignored
    #[must_use]
    pub fn new(total: Option<u64>, show_bar: bool) -> Self {
        if !show_bar {
            return Self { bar: None };
        }

        let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }

        Self { bar: Some(bar) }
    }
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        let Some(bar) = &self.bar else {
            return;
        };

        match event {
            ProgressEvent::Started { path, total, .. } => {
                if let Some(t) = total {
                    bar.set_length(t as u64);
                }
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                bar.set_message(name);
            }
            ProgressEvent::Resolved { .. } | ProgressEvent::Missing { .. } => bar.inc(1),
            ProgressEvent::Finished {
                total,
                with_focal,
                missing,
            } => {
                bar.finish_with_message(format!(
                    "Done: {total} scanned, {with_focal} with focal length, {missing} missing"
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_hidden_bar_ignores_events() {
        let bar = ProgressBar::new(Some(1), false);
        assert!(bar.bar.is_none());
        bar.on_event(ProgressEvent::Started {
            path: PathBuf::from("a.jpg"),
            index: 0,
            total: Some(1),
        });
    }

    #[test]
    fn test_bar_tracks_position() {
        let progress = ProgressBar::new(Some(2), true);
        progress.on_event(ProgressEvent::Missing {
            path: PathBuf::from("a.jpg"),
            reason: "no EXIF data".into(),
        });
        let bar = progress.bar.as_ref().unwrap_or_else(|| unreachable!());
        assert_eq!(bar.position(), 1);
        assert_eq!(bar.length(), Some(2));
    }
}
