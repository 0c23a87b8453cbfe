//! Batch scanner tests against mocked ports.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::path::PathBuf;

use focal_stats_core::{scan_images, FocalLength, ProgressEvent};
use focal_stats_test_support::{MockFocalReader, MockImageSource, MockProgressSink};

fn mm(value: f64) -> FocalLength {
    FocalLength::new(value).unwrap()
}

#[test]
fn test_totals_add_up() {
    let source = MockImageSource::new(["a.jpg", "b.jpg", "c.jpg", "d.png", "e.jpeg"]);
    let reader = MockFocalReader::new()
        .resolves("a.jpg", 24.0)
        .resolves("b.jpg", 50.0)
        .resolves("c.jpg", 24.0)
        .no_focal_field("d.png");

    let result = scan_images(&source, &reader, &());

    assert_eq!(result.total_images(), 5);
    assert_eq!(result.images_with_focal(), 3);
    assert_eq!(result.missing_exif(), 2);
    assert_eq!(result.focal_counts().get(mm(24.0)), Some(2));
    assert_eq!(result.focal_counts().get(mm(50.0)), Some(1));
    assert_eq!(result.focal_counts().total(), result.images_with_focal());
}

#[test]
fn test_read_errors_count_as_missing() {
    let source = MockImageSource::new(["ok.jpg", "broken.jpg"]);
    let reader = MockFocalReader::new()
        .resolves("ok.jpg", 35.0)
        .fails("broken.jpg", "unexpected end of file");
    let progress = MockProgressSink::new();

    let result = scan_images(&source, &reader, &progress);

    assert_eq!(result.total_images(), 2);
    assert_eq!(result.missing_exif(), 1);
    assert_eq!(result.focal_counts().len(), 1);

    let missing = progress.events().into_iter().find_map(|e| match e {
        ProgressEvent::Missing { path, reason } => Some((path, reason)),
        _ => None,
    });
    let (path, reason) = missing.unwrap();
    assert_eq!(path, PathBuf::from("broken.jpg"));
    assert!(reason.contains("unexpected end of file"));
}

#[test]
fn test_missing_images_never_become_keys() {
    let source = MockImageSource::new(["none.jpg", "nofield.jpg"]);
    let reader = MockFocalReader::new().no_focal_field("nofield.jpg");

    let result = scan_images(&source, &reader, &());

    assert_eq!(result.missing_exif(), 2);
    assert!(result.focal_counts().is_empty());
    assert_eq!(result.images_with_focal(), 0);
}

#[test]
fn test_traversal_errors_are_not_counted() {
    let source = MockImageSource::new(["a.jpg"]).with_traversal_error();
    let reader = MockFocalReader::new().resolves("a.jpg", 85.0);

    let result = scan_images(&source, &reader, &());

    assert_eq!(result.total_images(), 1);
    assert_eq!(reader.reads(), vec![PathBuf::from("a.jpg")]);
}

#[test]
fn test_progress_events() {
    let source = MockImageSource::new(["a.jpg", "b.jpg", "c.jpg"]);
    let reader = MockFocalReader::new()
        .resolves("a.jpg", 24.0)
        .resolves("b.jpg", 70.0);
    let progress = MockProgressSink::new();

    scan_images(&source, &reader, &progress);

    assert_eq!(progress.started_count(), 3);
    assert_eq!(progress.resolved_count(), 2);
    assert_eq!(progress.missing_count(), 1);
    assert_eq!(progress.finished_counts(), Some((3, 2, 1)));

    let first = progress.events().into_iter().next().unwrap();
    assert_eq!(
        first,
        ProgressEvent::Started {
            path: PathBuf::from("a.jpg"),
            index: 0,
            total: Some(3),
        }
    );
}

#[test]
fn test_most_common_follows_scan_order() {
    let source = MockImageSource::new(["1.jpg", "2.jpg", "3.jpg", "4.jpg"]);
    let reader = MockFocalReader::new()
        .resolves("1.jpg", 85.0)
        .resolves("2.jpg", 24.0)
        .resolves("3.jpg", 24.0)
        .resolves("4.jpg", 85.0);

    let result = scan_images(&source, &reader, &());

    assert_eq!(result.focal_counts().most_common(), Some((mm(85.0), 2)));
}

#[test]
fn test_empty_source() {
    let result = scan_images(&MockImageSource::empty(), &MockFocalReader::new(), &());
    assert_eq!(result.total_images(), 0);
    assert!(result.focal_counts().is_empty());
}
