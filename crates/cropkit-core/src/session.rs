//! A crop session: one engine state plus its config.
//!
//! Created when the crop screen opens, dropped when it closes. All methods
//! take `&mut self` and run synchronously on the interaction thread; the
//! only expensive step, rendering, goes through a detached [`CropRequest`].

use crate::aspect::CropMode;
use crate::config::{ConfigError, EngineConfig};
use crate::decode::{DecodedImage, FilterType};
use crate::engine::{transition, CropEvent, EngineState};
use crate::geometry::{Point, Rect, Size};
use crate::render::{scale_to_canvas, CropRequest};
use crate::touch::DragMode;

#[derive(Debug, Clone, Default)]
pub struct CropSession {
    config: EngineConfig,
    state: EngineState,
}

impl CropSession {
    /// Session with a caller-built config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `config` fails
    /// [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: EngineState::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Current crop rect, for drawing the overlay and guides.
    pub fn rect(&self) -> Rect {
        self.state.rect
    }

    pub fn mode(&self) -> CropMode {
        self.state.mode
    }

    pub fn drag_mode(&self) -> DragMode {
        self.state.drag
    }

    pub fn canvas_size(&self) -> Option<Size> {
        self.state.canvas
    }

    /// Filter used for both the preview and the final render.
    pub fn set_preview_filter(&mut self, filter: FilterType) {
        self.config.preview_filter = filter;
    }

    pub fn handle(&mut self, event: CropEvent) {
        self.state = transition(&self.state, &self.config, event);
    }

    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.handle(CropEvent::CanvasResized(Size::new(width, height)));
    }

    pub fn select_mode(&mut self, mode: CropMode) {
        self.handle(CropEvent::ModeSelected(mode));
    }

    pub fn drag_start(&mut self, x: f32, y: f32) {
        self.handle(CropEvent::DragStart(Point::new(x, y)));
    }

    pub fn drag_move(&mut self, x: f32, y: f32) {
        self.handle(CropEvent::DragMove(Point::new(x, y)));
    }

    pub fn drag_end(&mut self) {
        self.handle(CropEvent::DragEnd);
    }

    pub fn reset(&mut self) {
        self.handle(CropEvent::Reset);
    }

    /// Detached render input, `None` until the canvas has been measured.
    pub fn request(&self) -> Option<CropRequest> {
        CropRequest::from_state(&self.state, &self.config)
    }

    /// `source` scaled to the canvas with the render filter, for display
    /// under the overlay. `None` before the canvas is known or if scaling
    /// fails.
    pub fn preview(&self, source: &DecodedImage) -> Option<DecodedImage> {
        let canvas = self.state.canvas?;
        scale_to_canvas(source, canvas, self.config.preview_filter)
            .map_err(|e| tracing::warn!("[session] Preview scaling failed: {}", e))
            .ok()
    }

    /// Render the current selection of `source`.
    ///
    /// Before the canvas is known there is nothing to crop against, so the
    /// source comes back unchanged.
    pub fn crop(&self, source: &DecodedImage) -> DecodedImage {
        match self.request() {
            Some(request) => request.render(source),
            None => {
                tracing::warn!("[session] Crop requested before canvas size is known");
                source.clone()
            }
        }
    }
}
