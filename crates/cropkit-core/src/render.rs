//! Turning the final crop rect into an output image.
//!
//! The rect lives in canvas coordinates, so the source is first scaled to the
//! canvas size with the same filter the preview used. Cropping then happens
//! in the exact pixel space the user was looking at.
//!
//! Rendering never fails: if a resampling step breaks, the full scaled
//! source is returned (or the untouched source if even the canvas scale
//! failed) so the upload flow can carry on.

use crate::aspect::{CropMode, POST_RATIO};
use crate::config::{EngineConfig, TargetSize};
use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::engine::EngineState;
use crate::geometry::{Rect, Size};

/// Everything the renderer needs, detached from the live session.
///
/// Owned and `Send`, so it can be moved to a worker thread while the
/// interaction thread keeps processing pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequest {
    pub canvas: Size,
    pub rect: Rect,
    pub mode: CropMode,
    pub square_side: Option<f32>,
    pub post_target: TargetSize,
    pub filter: FilterType,
}

impl CropRequest {
    /// Snapshot `state`, or `None` if no canvas has been measured yet.
    pub fn from_state(state: &EngineState, config: &EngineConfig) -> Option<Self> {
        Some(Self {
            canvas: state.canvas?,
            rect: state.rect,
            mode: state.mode,
            square_side: state.square_side,
            post_target: config.post_target,
            filter: config.preview_filter,
        })
    }

    /// Render this request against `source`.
    pub fn render(&self, source: &DecodedImage) -> DecodedImage {
        render(source, self)
    }
}

/// Scale `source` to the canvas, as shown under the crop overlay.
///
/// The renderer crops from exactly this image, so front ends should display
/// it rather than letting the browser or view scale the source.
///
/// # Arguments
///
/// * `source` - Full-resolution source image
/// * `canvas` - Canvas size; rounded to whole pixels, at least 1x1
/// * `filter` - Resampling filter, normally the configured preview filter
///
/// # Errors
///
/// Returns the [`resize`] error when the source buffer is empty or malformed.
pub fn scale_to_canvas(
    source: &DecodedImage,
    canvas: Size,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    let (width, height) = canvas_pixels(canvas);
    resize(source, width, height, filter)
}

/// Crop `source` per `request`, falling back instead of failing.
///
/// The source is scaled to the canvas, cut to the request rect (whole
/// pixels, clamped, at least 1x1) and then finished for the mode: post crops
/// are trimmed to a centered 4:5 region and capped at the post target,
/// square crops are scaled to the recorded side, free crops are left as cut.
///
/// # Arguments
///
/// * `source` - Full-resolution source image
/// * `request` - Detached session snapshot
///
/// # Returns
///
/// The rendered crop. If scaling to the canvas fails the untouched source
/// comes back; if finishing fails, the canvas-scaled source. Both cases are
/// logged with `tracing::warn!`.
pub fn render(source: &DecodedImage, request: &CropRequest) -> DecodedImage {
    let scaled = match scale_to_canvas(source, request.canvas, request.filter) {
        Ok(scaled) => scaled,
        Err(e) => {
            tracing::warn!("[render] Scaling source to canvas failed, returning source: {}", e);
            return source.clone();
        }
    };

    match finish(&scaled, request) {
        Ok(output) => {
            tracing::debug!(
                "[render] {:?} crop {}x{} -> {}x{}",
                request.mode,
                scaled.width,
                scaled.height,
                output.width,
                output.height
            );
            output
        }
        Err(e) => {
            tracing::warn!("[render] Post-processing failed, returning scaled source: {}", e);
            scaled
        }
    }
}

fn finish(scaled: &DecodedImage, request: &CropRequest) -> Result<DecodedImage, DecodeError> {
    let cropped = crop_pixels(scaled, &request.rect);

    match request.mode {
        CropMode::FixedRatioPost => {
            let (fit_w, fit_h) = post_fit(cropped.width, cropped.height);
            let trimmed = crop_pixels(
                &cropped,
                &Rect::centered_in(
                    Size::new(cropped.width as f32, cropped.height as f32),
                    Size::new(fit_w as f32, fit_h as f32),
                ),
            );
            let (width, height) = post_output_size(trimmed.width, trimmed.height, request.post_target);
            resize(&trimmed, width, height, request.filter)
        }
        CropMode::Square => {
            let side = request
                .square_side
                .map(|s| s.round().max(1.0) as u32)
                .unwrap_or_else(|| cropped.width.min(cropped.height));
            resize(&cropped, side, side, request.filter)
        }
        CropMode::Free | CropMode::Reset => Ok(cropped),
    }
}

fn canvas_pixels(canvas: Size) -> (u32, u32) {
    let to_px = |v: f32| v.round().max(1.0) as u32;
    (to_px(canvas.width), to_px(canvas.height))
}

/// Copy the pixels under `rect`, rounded to whole pixels and clamped to the
/// image. The result is at least 1x1.
///
/// `image` must have a consistent buffer and be non-empty.
fn crop_pixels(image: &DecodedImage, rect: &Rect) -> DecodedImage {
    let to_px = |v: f32| v.round().max(0.0) as u32;

    let left = to_px(rect.x()).min(image.width.saturating_sub(1));
    let top = to_px(rect.y()).min(image.height.saturating_sub(1));
    let right = left.saturating_add(to_px(rect.width())).min(image.width);
    let bottom = top.saturating_add(to_px(rect.height())).min(image.height);

    let width = right.saturating_sub(left).max(1);
    let height = bottom.saturating_sub(top).max(1);

    let src_stride = image.width as usize * 3;
    let row_len = width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for y in top..top + height {
        let start = y as usize * src_stride + left as usize * 3;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(width, height, pixels)
}

/// Largest 4:5 size that fits inside `width` x `height`, at least 1x1.
fn post_fit(width: u32, height: u32) -> (u32, u32) {
    let (w, h) = (width as f32, height as f32);
    let (fit_w, fit_h) = if w / h > POST_RATIO {
        (h * POST_RATIO, h)
    } else {
        (w, w / POST_RATIO)
    };
    (
        (fit_w.round() as u32).clamp(1, width.max(1)),
        (fit_h.round() as u32).clamp(1, height.max(1)),
    )
}

/// Output size for an already trimmed post crop: `target` when the crop is at
/// least as wide, otherwise the crop's own size (never upscaled).
fn post_output_size(width: u32, height: u32, target: TargetSize) -> (u32, u32) {
    if width >= target.width {
        (target.width, target.height)
    } else {
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    /// Each pixel encodes its own position: R = x, G = y.
    fn coord_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn request(canvas: Size, rect: Rect, mode: CropMode) -> CropRequest {
        CropRequest {
            canvas,
            rect,
            mode,
            square_side: None,
            post_target: TargetSize::default(),
            filter: FilterType::Nearest,
        }
    }

    #[test]
    fn test_crop_pixels_offsets() {
        let img = coord_image(50, 40);
        let out = crop_pixels(&img, &Rect::new(10.0, 5.0, 20.0, 15.0));
        assert_eq!((out.width, out.height), (20, 15));
        assert_eq!(out.pixel(0, 0), Some([10, 5, 0]));
        assert_eq!(out.pixel(19, 14), Some([29, 19, 0]));
    }

    #[test]
    fn test_crop_pixels_rounds_and_clamps() {
        let img = coord_image(20, 20);
        let out = crop_pixels(&img, &Rect::new(14.6, -3.0, 30.0, 4.4));
        assert_eq!((out.width, out.height), (5, 4));
        assert_eq!(out.pixel(0, 0), Some([15, 0, 0]));
    }

    #[test]
    fn test_crop_pixels_zero_width_is_one_pixel() {
        let img = coord_image(20, 20);
        let out = crop_pixels(&img, &Rect::new(5.0, 5.0, 0.2, 0.3));
        assert_eq!((out.width, out.height), (1, 1));
        assert_eq!(out.pixels.len(), 3);
    }

    #[test]
    fn test_crop_pixels_past_far_edge() {
        let img = coord_image(20, 20);
        let out = crop_pixels(&img, &Rect::new(40.0, 40.0, 10.0, 10.0));
        assert_eq!((out.width, out.height), (1, 1));
        assert_eq!(out.pixel(0, 0), Some([19, 19, 0]));
    }

    #[test]
    fn test_render_free_is_unscaled_crop() {
        // Source already at canvas size: pure crop.
        let img = coord_image(100, 80);
        let req = request(Size::new(100.0, 80.0), Rect::new(10.0, 20.0, 30.0, 40.0), CropMode::Free);
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (30, 40));
        assert_eq!(out.pixel(0, 0), Some([10, 20, 0]));
    }

    #[test]
    fn test_render_scales_source_to_canvas_first() {
        // 200x200 source shown on a 100x100 canvas: the rect covers twice the
        // source pixels, but output is in canvas pixels.
        let img = coord_image(200, 200);
        let req = request(Size::new(100.0, 100.0), Rect::new(0.0, 0.0, 50.0, 50.0), CropMode::Free);
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (50, 50));
    }

    #[test]
    fn test_render_tiny_rect_never_panics() {
        let img = coord_image(64, 64);
        let req = request(Size::new(64.0, 64.0), Rect::new(30.0, 30.0, 0.3, 0.3), CropMode::Free);
        let out = render(&img, &req);
        assert!(out.width >= 1 && out.height >= 1);
    }

    #[test]
    fn test_render_square_uses_recorded_side() {
        let img = coord_image(300, 300);
        let mut req = request(Size::new(300.0, 300.0), Rect::new(50.0, 50.0, 200.0, 200.0), CropMode::Square);
        req.square_side = Some(150.0);
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (150, 150));
    }

    #[test]
    fn test_render_square_without_recorded_side() {
        let img = coord_image(300, 300);
        let req = request(Size::new(300.0, 300.0), Rect::new(0.0, 0.0, 120.0, 120.0), CropMode::Square);
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (120, 120));
    }

    #[test]
    fn test_render_post_caps_at_target() {
        let img = DecodedImage::filled(2000, 2500, [9, 9, 9]);
        let req = request(
            Size::new(2000.0, 2500.0),
            Rect::new(0.0, 0.0, 1600.0, 2000.0),
            CropMode::FixedRatioPost,
        );
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (1080, 1350));
    }

    #[test]
    fn test_render_post_never_upscales() {
        let img = DecodedImage::filled(500, 500, [9, 9, 9]);
        let req = request(
            Size::new(500.0, 500.0),
            Rect::new(10.0, 10.0, 400.0, 500.0),
            CropMode::FixedRatioPost,
        );
        let out = render(&img, &req);
        // Height clamps to 490 at the image edge; trimmed to 4:5 from there.
        assert_eq!((out.width, out.height), (392, 490));
    }

    #[test]
    fn test_render_post_trims_instead_of_squashing() {
        // 200 red columns at x 100..300, gray elsewhere.
        let mut pixels = Vec::with_capacity(500 * 500 * 3);
        for _ in 0..500 {
            for x in 0..500u32 {
                let px = if (100..300).contains(&x) { [255, 0, 0] } else { [9, 9, 9] };
                pixels.extend_from_slice(&px);
            }
        }
        let img = DecodedImage::new(500, 500, pixels);
        let req = request(
            Size::new(500.0, 500.0),
            Rect::new(10.0, 10.0, 400.0, 500.0),
            CropMode::FixedRatioPost,
        );
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (392, 490));

        let red_cols = (0..out.width)
            .filter(|&x| out.pixel(x, 0) == Some([255, 0, 0]))
            .count();
        assert_eq!(red_cols, 200);
        // The crop starts at x 10 and the 400 -> 392 trim is centered, so the
        // output's first column is source column 14.
        assert_eq!(out.pixel(85, 0), Some([9, 9, 9]));
        assert_eq!(out.pixel(86, 0), Some([255, 0, 0]));
        assert_eq!(out.pixel(285, 0), Some([255, 0, 0]));
        assert_eq!(out.pixel(286, 0), Some([9, 9, 9]));
    }

    #[test]
    fn test_render_post_wide_crop_trims_sides() {
        let img = coord_image(200, 100);
        let req = request(
            Size::new(200.0, 100.0),
            Rect::new(0.0, 0.0, 200.0, 100.0),
            CropMode::FixedRatioPost,
        );
        let out = render(&img, &req);
        assert_eq!((out.width, out.height), (80, 100));
        assert_eq!(out.pixel(0, 0), Some([60, 0, 0]));
        assert_eq!(out.pixel(79, 99), Some([139, 99, 0]));
    }

    #[test]
    fn test_render_broken_source_falls_back_to_source() {
        let broken = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![1; 4],
        };
        let req = request(Size::new(100.0, 100.0), Rect::new(0.0, 0.0, 50.0, 50.0), CropMode::Free);
        let out = render(&broken, &req);
        assert_eq!(out, broken);
    }

    #[test]
    fn test_render_empty_source_falls_back() {
        let empty = DecodedImage::filled(0, 0, [0, 0, 0]);
        let req = request(Size::new(10.0, 10.0), Rect::new(0.0, 0.0, 5.0, 5.0), CropMode::Square);
        let out = render(&empty, &req);
        assert!(out.is_empty());
    }

    #[test]
    fn test_post_fit() {
        assert_eq!(post_fit(720, 900), (720, 900));
        assert_eq!(post_fit(1000, 900), (720, 900));
        assert_eq!(post_fit(400, 1000), (400, 500));
        assert_eq!(post_fit(1, 1), (1, 1));
    }

    #[test]
    fn test_post_output_size() {
        let target = TargetSize::default();
        assert_eq!(post_output_size(720, 900, target), (720, 900));
        assert_eq!(post_output_size(4000, 5000, target), (1080, 1350));
        assert_eq!(post_output_size(1080, 1350, target), (1080, 1350));
        assert_eq!(post_output_size(1, 1, target), (1, 1));
    }

    #[test]
    fn test_request_from_state_requires_canvas() {
        let config = EngineConfig::default();
        assert!(CropRequest::from_state(&EngineState::default(), &config).is_none());

        let state = EngineState {
            canvas: Some(Size::new(10.0, 10.0)),
            rect: Rect::from_origin_size(Point::ZERO, Size::new(10.0, 10.0)),
            ..Default::default()
        };
        let req = CropRequest::from_state(&state, &config).unwrap();
        assert_eq!(req.filter, config.preview_filter);
        assert_eq!(req.post_target, config.post_target);
    }

    #[test]
    fn test_scale_to_canvas_rounds() {
        let img = coord_image(30, 30);
        let scaled = scale_to_canvas(&img, Size::new(10.4, 19.6), FilterType::Bilinear).unwrap();
        assert_eq!((scaled.width, scaled.height), (10, 20));
    }

    #[test]
    fn test_render_on_worker_thread() {
        let img = coord_image(40, 40);
        let req = request(Size::new(40.0, 40.0), Rect::new(5.0, 5.0, 10.0, 10.0), CropMode::Free);
        let handle = std::thread::spawn(move || req.render(&img));
        let out = handle.join().unwrap();
        assert_eq!((out.width, out.height), (10, 10));
    }
}
