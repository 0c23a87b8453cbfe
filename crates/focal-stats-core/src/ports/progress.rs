//! Progress reporting port for UI integration.

use std::path::PathBuf;

use crate::domain::FocalLength;

/// Events emitted while scanning.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Scanning started for an image.
    Started {
        /// Path to the image.
        path: PathBuf,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// A focal length was resolved for an image.
    Resolved {
        path: PathBuf,
        focal_length: FocalLength,
    },
    /// No focal length could be resolved for an image.
    Missing {
        path: PathBuf,
        /// Why no value was resolved.
        reason: String,
    },
    /// All images have been scanned.
    Finished {
        /// Images considered.
        total: usize,
        /// Images with a resolved focal length.
        with_focal: usize,
        /// Images without one.
        missing: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}

/// Discards all events.
impl ProgressSink for () {
    fn on_event(&self, _event: ProgressEvent) {}
}
