//! Resampling helpers built on `image::imageops`.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize to exact dimensions.
///
/// # Errors
///
/// `InvalidDimensions` for a zero target, `MalformedBuffer` when the source
/// buffer does not match its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    image.check_buffer()?;
    if image.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb = image.to_rgb_image()?;
    let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
    Ok(DecodedImage::from_rgb_image(resized))
}
