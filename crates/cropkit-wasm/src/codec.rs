//! Decoding source bytes and encoding rendered crops.

use cropkit_core::{decode_image as core_decode, encode as core_encode, ExportFormat};
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Decode JPEG, PNG or WebP bytes, applying EXIF orientation.
///
/// # Errors
///
/// Throws if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    core_decode(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as JPEG. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    core_encode(image.as_decoded(), ExportFormat::Jpeg { quality })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode an image as PNG.
#[wasm_bindgen]
pub fn encode_png(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    core_encode(image.as_decoded(), ExportFormat::Png).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_round_trip() {
        let pixels: Vec<u8> = (0..6 * 4 * 3).map(|i| (i * 5 % 256) as u8).collect();
        let img = JsDecodedImage::new(6, 4, pixels.clone());

        let bytes = encode_png(&img).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
        assert_eq!(decoded.pixels(), pixels);
    }

    #[test]
    fn test_encode_jpeg_magic() {
        let img = JsDecodedImage::new(8, 8, vec![90u8; 8 * 8 * 3]);
        let bytes = encode_jpeg(&img, 75).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
