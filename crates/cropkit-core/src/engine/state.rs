//! Engine state and its pure transition function.

use crate::aspect::{CropMode, POST_RATIO};
use crate::config::EngineConfig;
use crate::geometry::{Point, Rect, Size};
use crate::touch::{classify, DragMode};

use super::drag::{resize_corner, translate};

/// Everything that can drive the crop engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropEvent {
    /// The view was measured (initially, or again after rotation).
    CanvasResized(Size),
    /// A crop mode button was pressed. `CropMode::Reset` only resets.
    ModeSelected(CropMode),
    /// Pointer down, canvas-local coordinates.
    DragStart(Point),
    /// Pointer moved while down.
    DragMove(Point),
    /// Pointer up or gesture cancelled.
    DragEnd,
    /// Same as `ModeSelected(CropMode::Reset)`.
    Reset,
}

/// Snapshot of a crop session.
///
/// `mode` is never `CropMode::Reset`. `rect` is meaningless until `canvas`
/// is known.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngineState {
    pub canvas: Option<Size>,
    pub mode: CropMode,
    pub rect: Rect,
    pub drag: DragMode,
    pub last_pointer: Option<Point>,
    /// Side length of the square rect at the last reset in square mode.
    pub square_side: Option<f32>,
}

impl EngineState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }
}

/// Apply one event, returning the next state.
///
/// # Arguments
///
/// * `state` - Current state, left untouched
/// * `config` - Margins, inset and minimum size
/// * `event` - Layout, mode or pointer event
///
/// # Returns
///
/// The next state. Events that cannot apply (no canvas yet, invalid size,
/// a move without a drag) return `state` unchanged.
pub fn transition(state: &EngineState, config: &EngineConfig, event: CropEvent) -> EngineState {
    match event {
        CropEvent::CanvasResized(size) => canvas_resized(state, config, size),
        CropEvent::ModeSelected(mode) => mode_selected(state, config, mode),
        CropEvent::Reset => mode_selected(state, config, CropMode::Reset),
        CropEvent::DragStart(point) => drag_start(state, config, point),
        CropEvent::DragMove(point) => drag_move(state, config, point),
        CropEvent::DragEnd => EngineState {
            drag: DragMode::None,
            last_pointer: None,
            ..*state
        },
    }
}

/// Canonical rect for `mode` on `canvas`.
///
/// Free covers the whole canvas. Post and square are centered and inset by
/// `config.reset_inset`, but never smaller than `config.min_size()`.
///
/// `CropMode::Reset` is treated as `Free`; callers resolve it to the active
/// mode first. On canvases too small for the inset and minimum size, the
/// rect is clamped into the canvas rather than overflowing it.
pub fn reset_rect(canvas: Size, mode: CropMode, config: &EngineConfig) -> Rect {
    let inset = config.reset_inset;
    let min_size = config.min_size();

    match mode {
        CropMode::Free | CropMode::Reset => Rect::from_origin_size(Point::ZERO, canvas),
        CropMode::FixedRatioPost => {
            let mut width = (canvas.width - inset).min((canvas.height - inset) * POST_RATIO);
            width = width.max(min_size);
            // Fit back into the canvas if the minimum pushed it out.
            width = width.min(canvas.width).min(canvas.height * POST_RATIO);
            Rect::centered_in(canvas, Size::new(width, width / POST_RATIO))
        }
        CropMode::Square => {
            let fits = canvas.min_dimension();
            let side = (fits - inset).max(min_size).min(fits);
            Rect::centered_in(canvas, Size::new(side, side))
        }
    }
}

fn canvas_resized(state: &EngineState, config: &EngineConfig, size: Size) -> EngineState {
    if !size.is_valid() {
        tracing::warn!("[engine] Ignoring invalid canvas size {:?}", size);
        return *state;
    }
    if state.canvas == Some(size) {
        return *state;
    }

    tracing::debug!("[engine] Canvas resized to {}x{}", size.width, size.height);
    reset(
        &EngineState {
            canvas: Some(size),
            drag: DragMode::None,
            last_pointer: None,
            ..*state
        },
        config,
    )
}

fn mode_selected(state: &EngineState, config: &EngineConfig, mode: CropMode) -> EngineState {
    let mode = match mode {
        CropMode::Reset => state.mode,
        other => other,
    };
    tracing::debug!("[engine] Mode {:?}", mode);
    reset(&EngineState { mode, ..*state }, config)
}

fn reset(state: &EngineState, config: &EngineConfig) -> EngineState {
    let Some(canvas) = state.canvas else {
        return *state;
    };

    let rect = reset_rect(canvas, state.mode, config);
    let square_side = match state.mode {
        CropMode::Square => Some(rect.width()),
        _ => state.square_side,
    };
    tracing::debug!("[engine] Reset rect to {:?}", rect);

    EngineState {
        rect,
        square_side,
        ..*state
    }
}

fn drag_start(state: &EngineState, config: &EngineConfig, point: Point) -> EngineState {
    if state.canvas.is_none() {
        tracing::trace!("[engine] Drag start before canvas is known, dropped");
        return *state;
    }

    let drag = classify(point, &state.rect, config.edge_margin);
    tracing::debug!("[engine] Drag start at ({}, {}): {:?}", point.x, point.y, drag);
    EngineState {
        drag,
        last_pointer: Some(point),
        ..*state
    }
}

fn drag_move(state: &EngineState, config: &EngineConfig, point: Point) -> EngineState {
    let (Some(canvas), Some(last)) = (state.canvas, state.last_pointer) else {
        return *state;
    };

    let delta = point - last;
    let rect = match state.drag {
        DragMode::None => state.rect,
        DragMode::Move => translate(&state.rect, delta, canvas).unwrap_or_else(|| {
            tracing::trace!("[engine] Move by {:?} dropped at canvas corner", delta);
            state.rect
        }),
        DragMode::ResizeCorner(corner) => resize_corner(
            &state.rect,
            corner,
            delta,
            canvas,
            state.mode,
            config.min_size(),
        ),
    };

    EngineState {
        rect,
        last_pointer: Some(point),
        ..*state
    }
}
