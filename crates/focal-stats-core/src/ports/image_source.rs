//! Image source port for enumerating candidate image files.

use std::path::PathBuf;

/// Port for enumerating image files to scan.
pub trait ImageSource {
    /// Returns an iterator over image file paths from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if part of the source cannot be
    /// traversed. Such items are not images and are not counted.
    fn image_paths(&self) -> Box<dyn Iterator<Item = anyhow::Result<PathBuf>> + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
