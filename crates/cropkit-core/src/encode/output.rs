//! JPEG and PNG encoding via the `image` crate encoders.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{expected_len, DecodedImage};

/// Errors that can occur while encoding an output image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(#[from] image::ImageError),
}

/// Container format for the exported crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Lossy JPEG; `quality` is clamped to 1-100.
    Jpeg { quality: u8 },
    /// Lossless PNG.
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg { quality: 90 }
    }
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }
}

/// Encode an RGB image.
pub fn encode(image: &DecodedImage, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = expected_len(width, height);
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    match format {
        ExportFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100)).write_image(
                &image.pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(
                &image.pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    let bytes = buffer.into_inner();
    tracing::debug!(
        "[encode] {}x{} as {} ({} bytes)",
        width,
        height,
        format.mime_type(),
        bytes.len()
    );
    Ok(bytes)
}
