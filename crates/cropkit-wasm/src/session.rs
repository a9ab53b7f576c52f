//! JavaScript-facing crop session.

use cropkit_core::{CropMode, CropSession, EngineConfig, FilterType, Rect};
use wasm_bindgen::prelude::*;

use crate::types::JsDecodedImage;

/// Snapshot of the crop rect in canvas coordinates, for the overlay.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsCropRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl From<Rect> for JsCropRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// One crop screen's worth of state.
///
/// Mode codes: 0 = free, 1 = 4:5 post, 2 = square, 3 = reset. Unknown codes
/// select free.
///
/// Filter codes: 0 = nearest, 1 = bilinear, 2 = lanczos3. Unknown codes
/// select bilinear.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCropSession {
        JsCropSession {
            inner: CropSession::default(),
        }
    }

    /// Session configured from a TOML document.
    pub fn with_config(config_toml: &str) -> Result<JsCropSession, JsValue> {
        let inner = EngineConfig::from_toml_str(config_toml)
            .and_then(CropSession::new)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(JsCropSession { inner })
    }

    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.inner.set_canvas_size(width, height);
    }

    pub fn select_mode(&mut self, mode: u8) {
        self.inner.select_mode(CropMode::from(mode));
    }

    /// Active mode code (never 3).
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> u8 {
        match self.inner.mode() {
            CropMode::Free | CropMode::Reset => 0,
            CropMode::FixedRatioPost => 1,
            CropMode::Square => 2,
        }
    }

    /// Set the resampling filter shared by `preview` and `crop`.
    pub fn set_preview_filter(&mut self, filter: u8) {
        self.inner.set_preview_filter(FilterType::from(filter));
    }

    /// Active filter code.
    #[wasm_bindgen(getter)]
    pub fn preview_filter(&self) -> u8 {
        match self.inner.config().preview_filter {
            FilterType::Nearest => 0,
            FilterType::Bilinear => 1,
            FilterType::Lanczos3 => 2,
        }
    }

    pub fn drag_start(&mut self, x: f32, y: f32) {
        self.inner.drag_start(x, y);
    }

    pub fn drag_move(&mut self, x: f32, y: f32) {
        self.inner.drag_move(x, y);
    }

    pub fn drag_end(&mut self) {
        self.inner.drag_end();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.state().is_dragging()
    }

    pub fn rect(&self) -> JsCropRect {
        self.inner.rect().into()
    }

    /// Source scaled to the canvas with the render filter, for drawing under
    /// the overlay. `undefined` before the canvas is sized.
    pub fn preview(&self, source: &JsDecodedImage) -> Option<JsDecodedImage> {
        self.inner
            .preview(source.as_decoded())
            .map(JsDecodedImage::from_decoded)
    }

    /// Render the current selection. Never throws; on failure the scaled
    /// source comes back.
    pub fn crop(&self, source: &JsDecodedImage) -> JsDecodedImage {
        JsDecodedImage::from_decoded(self.inner.crop(source.as_decoded()))
    }
}

impl Default for JsCropSession {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_with_config_rejects_bad_margin() {
        assert!(JsCropSession::with_config("edge_margin = -1.0").is_err());
        assert!(JsCropSession::with_config("[post_target]\nwidth = 1000\nheight = 1000").is_err());
        assert!(JsCropSession::with_config("edge_margin = \"wide\"").is_err());
    }
}
