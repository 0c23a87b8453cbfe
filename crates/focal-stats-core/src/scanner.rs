//! Batch scanner: walks an image source and tallies focal lengths.

use tracing::{debug, info, warn};

use crate::domain::{FocalCounts, ScanResult};
use crate::ports::{FocalLengthReader, FocalLookup, ImageSource, ProgressEvent, ProgressSink};

/// Scans every image from `source` and aggregates focal lengths.
///
/// Per-image failures never abort the batch: an image whose metadata is
/// missing or unreadable is logged and counted as missing. Traversal errors
/// reported by the source are logged and the entry is not counted.
pub fn scan_images(
    source: &dyn ImageSource,
    reader: &dyn FocalLengthReader,
    progress: &dyn ProgressSink,
) -> ScanResult {
    let total_hint = source.count_hint();
    let mut counts = FocalCounts::new();
    let mut missing = 0usize;
    let mut index = 0usize;

    for entry in source.image_paths() {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable entry: {e:#}");
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total: total_hint,
        });
        index += 1;

        let reason = match reader.read_focal_length(&path) {
            Ok(FocalLookup::Resolved(focal_length)) => {
                debug!("{}: {focal_length} mm", path.display());
                counts.record(focal_length);
                progress.on_event(ProgressEvent::Resolved { path, focal_length });
                continue;
            }
            Ok(FocalLookup::NoMetadata) => {
                warn!("{} has no EXIF data", path.display());
                String::from("no EXIF data")
            }
            Ok(FocalLookup::NoFocalField) => {
                debug!("{} has no focal length field", path.display());
                String::from("no focal length field")
            }
            Err(e) => {
                warn!("Failed to read focal length from {}: {e:#}", path.display());
                format!("{e:#}")
            }
        };

        missing += 1;
        progress.on_event(ProgressEvent::Missing { path, reason });
    }

    let result = ScanResult::new(counts, missing);
    info!(
        "Scanned {} images: {} with focal length, {} missing",
        result.total_images(),
        result.images_with_focal(),
        result.missing_exif()
    );
    progress.on_event(ProgressEvent::Finished {
        total: result.total_images(),
        with_focal: result.images_with_focal(),
        missing: result.missing_exif(),
    });

    result
}
