//! Crop modes and the aspect-ratio constraint applied during resizes.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Width / height of a portrait feed post (4:5).
pub const POST_RATIO: f32 = 0.8;

/// Active crop policy, or the `Reset` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropMode {
    /// Any width and height.
    #[default]
    Free,
    /// Portrait post, width:height = 4:5.
    FixedRatioPost,
    /// Width equals height.
    Square,
    /// Recompute the rectangle for the currently active mode.
    Reset,
}

impl From<u8> for CropMode {
    fn from(value: u8) -> Self {
        match value {
            1 => CropMode::FixedRatioPost,
            2 => CropMode::Square,
            3 => CropMode::Reset,
            _ => CropMode::Free,
        }
    }
}

/// Constrain a candidate `(width, height)` to `mode`.
///
/// Only ever shrinks one dimension, so a candidate that already fits inside
/// the canvas keeps fitting.
///
/// # Returns
///
/// `(width, height)` unchanged for free, the smaller side twice for square,
/// and for post the candidate with its too-long side cut to 4:5.
pub fn constrain(width: f32, height: f32, mode: CropMode) -> (f32, f32) {
    match mode {
        CropMode::Free | CropMode::Reset => (width, height),
        CropMode::FixedRatioPost => {
            if width / height > POST_RATIO {
                (height * POST_RATIO, height)
            } else {
                (width, width / POST_RATIO)
            }
        }
        CropMode::Square => {
            let side = width.min(height);
            (side, side)
        }
    }
}

/// Smallest candidate size the resize clamp may hand to [`constrain`].
///
/// `constrain` shrinks the longer side of a post crop, so the height floor is
/// raised until `height * POST_RATIO` still meets `min_size`.
pub fn min_candidate(mode: CropMode, min_size: f32) -> Size {
    match mode {
        CropMode::FixedRatioPost => Size::new(min_size, min_size / POST_RATIO),
        _ => Size::new(min_size, min_size),
    }
}
