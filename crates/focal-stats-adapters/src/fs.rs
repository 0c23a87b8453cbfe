//! Filesystem adapter for discovering images.

use std::path::{Path, PathBuf};

use anyhow::Result;
use focal_stats_core::ImageSource;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// File name suffixes scanned for metadata, compared case-insensitively.
const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Filesystem image source adapter.
///
/// Walks every root recursively. Entries within a directory are visited in
/// file name order, so repeated scans of the same tree see images in the
/// same order. Symbolic links to directories are not followed.
pub struct FsImageSource {
    roots: Vec<PathBuf>,
}

impl FsImageSource {
    /// Creates a new filesystem image source over the given directories.
    #[must_use]
    pub const fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    fn walk(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        self.roots.iter().flat_map(|root| {
            WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => (is_file_entry(&entry) && is_supported_image(entry.path()))
                        .then(|| Ok(entry.into_path())),
                    Err(e) => {
                        let at = e
                            .path()
                            .map_or_else(String::new, |p| format!(" at {}", p.display()));
                        Some(Err(anyhow::Error::new(e).context(format!("Traversal failed{at}"))))
                    }
                })
        })
    }
}

impl ImageSource for FsImageSource {
    fn image_paths(&self) -> Box<dyn Iterator<Item = Result<PathBuf>> + '_> {
        debug!("Walking {} root(s)", self.roots.len());
        Box::new(self.walk())
    }

    /// Walks the whole tree once more, separately from `image_paths`.
    fn count_hint(&self) -> Option<usize> {
        Some(self.walk().filter(Result::is_ok).count())
    }
}

/// Anything listed in a directory that is not a directory itself.
///
/// Links are not followed, so a link counts as a file unless it resolves to
/// a directory; a dangling link is a file that will fail to read.
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        !entry.path().is_dir()
    } else {
        !file_type.is_dir()
    }
}

/// Checks if a file name ends with a supported image suffix.
fn is_supported_image(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}
