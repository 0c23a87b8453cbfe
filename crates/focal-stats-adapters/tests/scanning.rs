//! End-to-end scans of real directory trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use focal_stats_adapters::{ExifFocalReader, FsImageSource};
use focal_stats_core::{scan_images, FocalLength, ImageSource};
use focal_stats_test_support::{plain_jpeg, plain_png, ExifImageBuilder, PhotoTree};

fn mm(value: f64) -> FocalLength {
    FocalLength::new(value).unwrap()
}

fn scan(roots: Vec<PathBuf>) -> focal_stats_core::ScanResult {
    scan_images(&FsImageSource::new(roots), &ExifFocalReader::new(), &())
}

#[test]
fn test_only_image_suffixes_are_counted() {
    let tree = PhotoTree::new().unwrap();
    let fifty = ExifImageBuilder::new().focal_length(50, 1);
    tree.jpeg("a.jpg", &fifty).unwrap();
    tree.jpeg("b.JPG", &fifty).unwrap();
    tree.jpeg("c.Jpeg", &fifty).unwrap();
    tree.file("d.png", &plain_png().unwrap()).unwrap();
    tree.jpeg("notes.txt", &fifty).unwrap();
    tree.jpeg("raw.cr2", &fifty).unwrap();
    tree.file("thumbs.db", b"junk").unwrap();

    let result = scan(vec![tree.path().to_path_buf()]);

    assert_eq!(result.total_images(), 4);
    assert_eq!(result.images_with_focal(), 3);
    assert_eq!(result.missing_exif(), 1);
    assert_eq!(result.focal_counts().get(mm(50.0)), Some(3));
}

#[test]
fn test_recurses_into_subdirectories() {
    let tree = PhotoTree::new().unwrap();
    tree.jpeg("2023/summer/beach.jpg", &ExifImageBuilder::new().focal_length(24, 1))
        .unwrap();
    tree.jpeg("2023/winter/snow.jpg", &ExifImageBuilder::new().focal_length(241, 10))
        .unwrap();
    tree.jpeg("2024/portrait.jpeg", &ExifImageBuilder::new().focal_length_35mm(85))
        .unwrap();

    let result = scan(vec![tree.path().to_path_buf()]);

    assert_eq!(result.total_images(), 3);
    let sorted = result.focal_counts().sorted();
    assert_eq!(sorted, vec![(mm(24.0), 1), (mm(24.1), 1), (mm(85.0), 1)]);
}

#[test]
fn test_multiple_roots_are_combined() {
    let first = PhotoTree::new().unwrap();
    let second = PhotoTree::new().unwrap();
    let builder = ExifImageBuilder::new().focal_length(35, 1);
    first.jpeg("one.jpg", &builder).unwrap();
    second.jpeg("two.jpg", &builder).unwrap();
    second.file("three.jpg", &plain_jpeg().unwrap()).unwrap();

    let result = scan(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

    assert_eq!(result.total_images(), 3);
    assert_eq!(result.focal_counts().get(mm(35.0)), Some(2));
    assert_eq!(result.missing_exif(), 1);
}

#[test]
fn test_broken_and_bare_files_count_as_missing() {
    let tree = PhotoTree::new().unwrap();
    tree.jpeg("good.jpg", &ExifImageBuilder::new().focal_length(50, 1))
        .unwrap();
    tree.file("corrupt.jpg", b"not really a jpeg").unwrap();
    tree.file("bare.jpg", &plain_jpeg().unwrap()).unwrap();
    tree.jpeg("nofocal.jpg", &ExifImageBuilder::new().model("Q2"))
        .unwrap();
    tree.jpeg("zero.jpg", &ExifImageBuilder::new().focal_length(50, 0))
        .unwrap();

    let result = scan(vec![tree.path().to_path_buf()]);

    assert_eq!(result.total_images(), 5);
    assert_eq!(result.images_with_focal(), 1);
    assert_eq!(result.missing_exif(), 4);
    assert_eq!(result.focal_counts().len(), 1);
}

#[test]
fn test_visit_order_is_sorted_by_name() {
    let tree = PhotoTree::new().unwrap();
    let builder = ExifImageBuilder::new().focal_length(50, 1);
    for name in ["c.jpg", "a.jpg", "b/inner.jpg", "b.jpg"] {
        tree.jpeg(name, &builder).unwrap();
    }

    let source = FsImageSource::new(vec![tree.path().to_path_buf()]);
    let names: Vec<String> = source
        .image_paths()
        .map(|p| {
            p.unwrap()
                .strip_prefix(tree.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(names, vec!["a.jpg", "b/inner.jpg", "b.jpg", "c.jpg"]);
    assert_eq!(source.count_hint(), Some(4));
}

#[test]
fn test_png_with_exif_resolves() {
    let tree = PhotoTree::new().unwrap();
    tree.png(
        "phone/IMG_0001.PNG",
        &ExifImageBuilder::new().focal_length(435, 100),
    )
    .unwrap();
    tree.png(
        "phone/IMG_0002.png",
        &ExifImageBuilder::new()
            .focal_length(435, 100)
            .focal_length_35mm(26),
    )
    .unwrap();
    tree.file("phone/screenshot.png", &plain_png().unwrap()).unwrap();

    let result = scan(vec![tree.path().to_path_buf()]);

    assert_eq!(result.total_images(), 3);
    assert_eq!(result.missing_exif(), 1);
    assert_eq!(
        result.focal_counts().sorted(),
        vec![(mm(4.3), 1), (mm(26.0), 1)]
    );
}

#[cfg(unix)]
#[test]
fn test_dangling_link_counts_as_missing() {
    use std::os::unix::fs::symlink;

    let tree = PhotoTree::new().unwrap();
    tree.jpeg("real.jpg", &ExifImageBuilder::new().focal_length(50, 1))
        .unwrap();
    symlink(tree.path().join("gone.jpg"), tree.path().join("dangling.jpg")).unwrap();

    let result = scan(vec![tree.path().to_path_buf()]);

    assert_eq!(result.total_images(), 2);
    assert_eq!(result.images_with_focal(), 1);
    assert_eq!(result.missing_exif(), 1);
}

#[cfg(unix)]
#[test]
fn test_linked_directories_are_not_followed() {
    use std::os::unix::fs::symlink;

    let photos = PhotoTree::new().unwrap();
    photos
        .jpeg("album/a.jpg", &ExifImageBuilder::new().focal_length(35, 1))
        .unwrap();
    // named like an image, but resolves to a directory
    symlink(photos.path().join("album"), photos.path().join("album.jpg")).unwrap();
    symlink(photos.path().join("album"), photos.path().join("shortcut")).unwrap();

    let result = scan(vec![photos.path().to_path_buf()]);

    assert_eq!(result.total_images(), 1);
    assert_eq!(result.focal_counts().get(mm(35.0)), Some(1));
}

#[cfg(unix)]
#[test]
fn test_linked_files_are_read() {
    use std::os::unix::fs::symlink;

    let photos = PhotoTree::new().unwrap();
    let target = photos
        .jpeg("originals/a.jpeg", &ExifImageBuilder::new().focal_length(85, 1))
        .unwrap();
    symlink(&target, photos.path().join("favorite.jpg")).unwrap();

    let result = scan(vec![photos.path().to_path_buf()]);

    assert_eq!(result.total_images(), 2);
    assert_eq!(result.focal_counts().get(mm(85.0)), Some(2));
}

#[test]
fn test_empty_directory() {
    let tree = PhotoTree::new().unwrap();
    let result = scan(vec![tree.path().to_path_buf()]);
    assert_eq!(result.total_images(), 0);
    assert!(result.focal_counts().is_empty());
}
