//! Image buffers, decoding and resampling.
//!
//! The engine works on plain RGB8 buffers ([`DecodedImage`]). Encoded bytes
//! from the image loader go through [`decode_image`], which also applies EXIF
//! orientation so the canvas preview matches what the renderer crops.

mod loader;
mod resize;
mod types;

pub use loader::{decode_image, read_orientation};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

pub(crate) use types::expected_len;
