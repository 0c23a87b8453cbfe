//! Focal length reader port.

use std::path::Path;

use crate::domain::FocalLength;

/// Outcome of looking up the focal length of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocalLookup {
    /// A focal length was resolved from the metadata.
    Resolved(FocalLength),
    /// The image carries metadata but neither focal length field.
    NoFocalField,
    /// The image carries no embedded metadata at all.
    NoMetadata,
}

/// Port for reading the focal length embedded in an image file.
pub trait FocalLengthReader {
    /// Reads the focal length of the image at `path`.
    ///
    /// The 35mm-equivalent value takes priority over the raw focal length.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its metadata is
    /// malformed, or a focal length field has an unexpected type.
    fn read_focal_length(&self, path: &Path) -> anyhow::Result<FocalLookup>;
}
