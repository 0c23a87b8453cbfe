//! Fixture builders for image files.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, RgbImage};
use tempfile::TempDir;

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP1: [u8; 2] = [0xFF, 0xE1];
const EOI: [u8; 2] = [0xFF, 0xD9];
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";
const PNG_SIGNATURE_LEN: usize = 8;
/// Length, type, 13 data bytes and CRC.
const PNG_IHDR_LEN: usize = 4 + 4 + 13 + 4;
const PNG_EXIF_CHUNK: &[u8; 4] = b"eXIf";

/// Builds images whose embedded EXIF carries the chosen fields.
///
/// [`build`](Self::build) writes a minimal JPEG with an APP1 segment and no
/// image data; [`build_png`](Self::build_png) writes a real PNG with an
/// `eXIf` chunk after `IHDR`.
#[derive(Debug, Default, Clone)]
pub struct ExifImageBuilder {
    fields: Vec<Field>,
}

impl ExifImageBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `FocalLength` as a rational.
    #[must_use]
    pub fn focal_length(self, numerator: u32, denominator: u32) -> Self {
        self.field(
            Tag::FocalLength,
            Value::Rational(vec![Rational {
                num: numerator,
                denom: denominator,
            }]),
        )
    }

    /// Sets `FocalLengthIn35mmFilm`.
    #[must_use]
    pub fn focal_length_35mm(self, millimeters: u16) -> Self {
        self.field(Tag::FocalLengthIn35mmFilm, Value::Short(vec![millimeters]))
    }

    /// Sets the camera model, for files with EXIF but no focal length.
    #[must_use]
    pub fn model(self, model: &str) -> Self {
        self.field(Tag::Model, Value::Ascii(vec![model.as_bytes().to_vec()]))
    }

    /// Sets an arbitrary field in the primary image IFD.
    #[must_use]
    pub fn field(mut self, tag: Tag, value: Value) -> Self {
        self.fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value,
        });
        self
    }

    /// Encodes the fields as a TIFF-structured EXIF block.
    fn tiff(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer
            .write(&mut tiff, false)
            .context("Failed to encode EXIF block")?;
        Ok(tiff.into_inner())
    }

    /// Encodes the JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the EXIF writer rejects a field.
    pub fn build(&self) -> Result<Vec<u8>> {
        let tiff = self.tiff()?;

        let segment_len = u16::try_from(2 + EXIF_HEADER.len() + tiff.len())
            .context("EXIF block too large for one APP1 segment")?;

        let mut jpeg = Vec::with_capacity(tiff.len() + 16);
        jpeg.extend_from_slice(&SOI);
        jpeg.extend_from_slice(&APP1);
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(EXIF_HEADER);
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&EOI);
        Ok(jpeg)
    }

    /// Encodes a PNG carrying the fields in an `eXIf` chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the EXIF writer rejects a field or PNG encoding
    /// fails.
    pub fn build_png(&self) -> Result<Vec<u8>> {
        let tiff = self.tiff()?;
        let base = plain_png()?;
        let split = PNG_SIGNATURE_LEN + PNG_IHDR_LEN;

        let chunk_len =
            u32::try_from(tiff.len()).context("EXIF block too large for one PNG chunk")?;
        let mut crc_input = PNG_EXIF_CHUNK.to_vec();
        crc_input.extend_from_slice(&tiff);

        let mut png = Vec::with_capacity(base.len() + tiff.len() + 12);
        png.extend_from_slice(&base[..split]);
        png.extend_from_slice(&chunk_len.to_be_bytes());
        png.extend_from_slice(&crc_input);
        png.extend_from_slice(&crc32(&crc_input).to_be_bytes());
        png.extend_from_slice(&base[split..]);
        Ok(png)
    }

    /// Writes the JPEG to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.build()?;
        fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// CRC-32 (ISO-HDLC) as used by PNG chunks.
fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = !0u32;
    for byte in bytes {
        crc ^= u32::from(*byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// A small real JPEG without any EXIF segment.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn plain_jpeg() -> Result<Vec<u8>> {
    encode(ImageFormat::Jpeg)
}

/// A small real PNG without an `eXIf` chunk.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn plain_png() -> Result<Vec<u8>> {
    encode(ImageFormat::Png)
}

fn encode(format: ImageFormat) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([135, 206, 235])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .with_context(|| format!("Failed to encode {format:?} fixture"))?;
    Ok(buf.into_inner())
}

/// A photo directory tree under a temporary root.
///
/// Files are created relative to the root, creating parent directories as
/// needed.
pub struct PhotoTree {
    root: TempDir,
}

impl PhotoTree {
    /// Creates an empty tree in a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: tempfile::tempdir().context("Failed to create temporary directory")?,
        })
    }

    /// Root directory of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Writes `bytes` to `relative`, returning the full path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be created.
    pub fn file(&self, relative: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Writes a JPEG with the given EXIF fields to `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn jpeg(&self, relative: &str, exif: &ExifImageBuilder) -> Result<PathBuf> {
        self.file(relative, &exif.build()?)
    }

    /// Writes a PNG with the given EXIF fields to `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn png(&self, relative: &str, exif: &ExifImageBuilder) -> Result<PathBuf> {
        self.file(relative, &exif.build_png()?)
    }
}
