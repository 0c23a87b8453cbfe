//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use focal_stats_core::ports::{
    FocalLengthReader, FocalLookup, ImageSource, ProgressEvent, ProgressSink,
};
use focal_stats_core::FocalLength;

/// Mock implementation of `ImageSource` for testing.
///
/// Yields a fixed list of paths; `None` entries are yielded as traversal
/// errors.
pub struct MockImageSource {
    entries: Vec<Option<PathBuf>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given paths.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            entries: paths.into_iter().map(|p| Some(p.into())).collect(),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry that fails to traverse.
    #[must_use]
    pub fn with_traversal_error(mut self) -> Self {
        self.entries.push(None);
        self
    }
}

impl ImageSource for MockImageSource {
    fn image_paths(&self) -> Box<dyn Iterator<Item = anyhow::Result<PathBuf>> + '_> {
        Box::new(self.entries.iter().map(|entry| {
            entry
                .clone()
                .ok_or_else(|| anyhow::anyhow!("permission denied"))
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.entries.iter().flatten().count())
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Lookup(FocalLookup),
    Fail(String),
}

/// Mock implementation of `FocalLengthReader` for testing.
///
/// Paths without a configured outcome resolve to `NoMetadata`.
#[derive(Debug, Default)]
pub struct MockFocalReader {
    outcomes: HashMap<PathBuf, Outcome>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockFocalReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `path` resolves to `millimeters`.
    ///
    /// # Panics
    ///
    /// Panics if `millimeters` is not finite.
    #[must_use]
    pub fn resolves(self, path: impl Into<PathBuf>, millimeters: f64) -> Self {
        #[allow(clippy::expect_used)]
        let focal = FocalLength::new(millimeters).expect("finite focal length");
        self.outcome(path, Outcome::Lookup(FocalLookup::Resolved(focal)))
    }

    /// `path` has EXIF but no focal length field.
    #[must_use]
    pub fn no_focal_field(self, path: impl Into<PathBuf>) -> Self {
        self.outcome(path, Outcome::Lookup(FocalLookup::NoFocalField))
    }

    /// Reading `path` fails with `message`.
    #[must_use]
    pub fn fails(self, path: impl Into<PathBuf>, message: &str) -> Self {
        self.outcome(path, Outcome::Fail(message.to_owned()))
    }

    fn outcome(mut self, path: impl Into<PathBuf>, outcome: Outcome) -> Self {
        self.outcomes.insert(path.into(), outcome);
        self
    }

    /// Paths read so far, in order.
    #[must_use]
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl FocalLengthReader for MockFocalReader {
    fn read_focal_length(&self, path: &Path) -> anyhow::Result<FocalLookup> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_path_buf());

        match self.outcomes.get(path) {
            Some(Outcome::Lookup(lookup)) => Ok(*lookup),
            Some(Outcome::Fail(message)) => Err(anyhow::anyhow!("{message}")),
            None => Ok(FocalLookup::NoMetadata),
        }
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
#[derive(Debug, Default)]
pub struct MockProgressSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Started` events.
    #[must_use]
    pub fn started_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Started { .. }))
    }

    /// Returns the number of `Resolved` events.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Resolved { .. }))
    }

    /// Returns the number of `Missing` events.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.count(|e| matches!(e, ProgressEvent::Missing { .. }))
    }

    /// Returns the totals from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished {
                total,
                with_focal,
                missing,
            } => Some((*total, *with_focal, *missing)),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&ProgressEvent) -> bool) -> usize {
        self.events().iter().filter(|&e| predicate(e)).count()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
