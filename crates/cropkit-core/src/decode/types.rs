//! Image buffer, resampling filter and decode error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding or resampling an image buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not an image format this build can read.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The bytes look like an image but decoding failed part way.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Pixel buffer length disagrees with the declared dimensions.
    #[error("Malformed pixel buffer: expected {expected} bytes for {width}x{height}, got {actual}")]
    MalformedBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A resize was requested with a zero width or height.
    #[error("Invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Resampling filter used when scaling images.
///
/// The interactive preview and the final render must use the same filter so
/// the pixels under the overlay are the pixels that end up in the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor (fastest, blocky).
    Nearest,
    /// Bilinear (fast, good enough for screen-sized previews).
    #[default]
    Bilinear,
    /// Lanczos3 (slow, sharpest).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's filter.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Wire code used by the bindings: 0 = nearest, 1 = bilinear, 2 = lanczos3.
/// Unknown codes fall back to bilinear.
impl From<u8> for FilterType {
    fn from(value: u8) -> Self {
        match value {
            0 => FilterType::Nearest,
            2 => FilterType::Lanczos3,
            _ => FilterType::Bilinear,
        }
    }
}

/// EXIF orientation tag values (1-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90CW,
    Transverse,
    Rotate270CW,
}

impl Orientation {
    /// Map an EXIF tag value; anything outside 1-8 is treated as upright.
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An RGB8 image, row-major, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            expected_len(width, height),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A single-color image, mostly useful for placeholders and tests.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(expected_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Copy into an `image::RgbImage` for `image::imageops`.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, DecodeError> {
        self.check_buffer()?;
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| self.malformed())
    }

    /// Fails when the buffer length disagrees with the dimensions.
    pub fn check_buffer(&self) -> Result<(), DecodeError> {
        if self.pixels.len() == expected_len(self.width, self.height) {
            Ok(())
        } else {
            Err(self.malformed())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.pixels
            .get(idx..idx + 3)
            .map(|p| [p[0], p[1], p[2]])
    }

    fn malformed(&self) -> DecodeError {
        DecodeError::MalformedBuffer {
            width: self.width,
            height: self.height,
            expected: expected_len(self.width, self.height),
            actual: self.pixels.len(),
        }
    }
}

#[inline]
pub(crate) fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}
