//! Decoding encoded image bytes into an upright RGB buffer.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode JPEG, PNG or WebP bytes and rotate them upright per EXIF.
///
/// # Errors
///
/// `InvalidFormat` when the format cannot be guessed, `CorruptedFile` when
/// decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = orient(img, read_orientation(bytes));
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// EXIF orientation of `bytes`, `Normal` when absent or unreadable.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map_or(Orientation::Normal, Orientation::from_exif)
}

fn orient(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode, ExportFormat};

    fn two_pixel() -> DynamicImage {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_decode_png() {
        let src = DecodedImage::filled(7, 3, [10, 20, 30]);
        let bytes = encode(&src, ExportFormat::Png).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let src = DecodedImage::filled(16, 8, [200, 200, 200]);
        let bytes = encode(&src, ExportFormat::Jpeg { quality: 90 }).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 8));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_image(&[0x00, 0x01, 0x02, 0x03]),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode(&DecodedImage::filled(8, 8, [1, 2, 3]), ExportFormat::Png).unwrap();
        assert!(decode_image(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = encode(&DecodedImage::filled(2, 2, [0, 0, 0]), ExportFormat::Png).unwrap();
        assert_eq!(read_orientation(&bytes), Orientation::Normal);
        assert_eq!(read_orientation(&[1, 2, 3]), Orientation::Normal);
    }

    #[test]
    fn test_orient_rotate90_swaps() {
        let out = orient(two_pixel(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(out.dimensions(), (1, 2));
    }

    #[test]
    fn test_orient_flip_horizontal() {
        let out = orient(two_pixel(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
