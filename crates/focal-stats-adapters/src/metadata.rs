//! EXIF focal length extraction.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use exif::{Exif, Field, In, Tag, Value};
use focal_stats_core::{FocalLength, FocalLengthReader, FocalLookup};

/// Reads focal lengths with `kamadak-exif`.
///
/// The container format (JPEG, PNG, TIFF, HEIF, WebP) is detected from the
/// file contents, not its name.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifFocalReader;

impl ExifFocalReader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads the focal length from an in-memory or on-disk container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container or its EXIF block is malformed, or
    /// a focal length field is not numeric.
    pub fn read_from<R: BufRead + Seek>(&self, reader: &mut R) -> Result<FocalLookup> {
        match exif::Reader::new().read_from_container(reader) {
            Ok(exif) => resolve_focal_length(&exif),
            Err(exif::Error::NotFound(_)) => Ok(FocalLookup::NoMetadata),
            Err(e) => Err(anyhow::Error::new(e).context("Malformed EXIF data")),
        }
    }
}

impl FocalLengthReader for ExifFocalReader {
    fn read_focal_length(&self, path: &Path) -> Result<FocalLookup> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Resolves the focal length from parsed EXIF.
///
/// `FocalLengthIn35mmFilm` wins whenever present; otherwise `FocalLength` is
/// used, with rationals rounded to one decimal place.
///
/// # Errors
///
/// Returns an error if the chosen field has no value or a non-numeric type.
pub fn resolve_focal_length(exif: &Exif) -> Result<FocalLookup> {
    let field = exif
        .get_field(Tag::FocalLengthIn35mmFilm, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::FocalLength, In::PRIMARY));

    match field {
        Some(field) => focal_from_field(field).map(FocalLookup::Resolved),
        None => Ok(FocalLookup::NoFocalField),
    }
}

fn focal_from_field(field: &Field) -> Result<FocalLength> {
    let tag = field.tag;
    let empty = || anyhow!("{tag} has no value");
    let zero_denominator = || anyhow!("{tag} has a zero denominator");

    let millimeters = match &field.value {
        Value::Rational(v) => {
            let r = v.first().ok_or_else(empty)?;
            return FocalLength::from_rational(r.num, r.denom).ok_or_else(zero_denominator);
        }
        Value::SRational(v) => {
            let r = v.first().ok_or_else(empty)?;
            return FocalLength::from_signed_rational(r.num, r.denom)
                .ok_or_else(zero_denominator);
        }
        Value::Short(v) => {
            return v.first().copied().map(FocalLength::from).ok_or_else(empty);
        }
        Value::Long(v) => {
            return v.first().copied().map(FocalLength::from).ok_or_else(empty);
        }
        Value::Byte(v) => v.first().map(|n| f64::from(*n)),
        Value::SByte(v) => v.first().map(|n| f64::from(*n)),
        Value::SShort(v) => v.first().map(|n| f64::from(*n)),
        Value::SLong(v) => v.first().map(|n| f64::from(*n)),
        Value::Float(v) => v.first().map(|n| f64::from(*n)),
        Value::Double(v) => v.first().copied(),
        _ => bail!("{tag} has a non-numeric value"),
    };

    Ok(FocalLength::new(millimeters.ok_or_else(empty)?)?)
}
