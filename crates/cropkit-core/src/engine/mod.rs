//! The crop rectangle state machine.
//!
//! State lives in an immutable [`EngineState`]; [`transition`] maps
//! `(state, config, event)` to the next state, so the whole gesture logic is
//! testable without a UI toolkit.
//!
//! # States
//!
//! - **Idle**: `drag == DragMode::None`.
//! - **Dragging**: set by `DragStart`, ended by `DragEnd`. The drag mode is
//!   chosen once on pointer down by [`crate::touch::classify`].
//!
//! # Invariants
//!
//! Once a canvas is known, after every event:
//!
//! - the rect lies inside `(0, 0) .. canvas`
//! - both sides are at least `config.min_size()` (unless the canvas itself
//!   is smaller)
//! - square mode keeps `width == height`, post mode keeps `width / height`
//!   at 4:5
//!
//! Events that arrive before the first `CanvasResized` are dropped.
//!
//! # Gesture quirks
//!
//! Corners are hit-tested bottom-right first (see [`crate::touch`]), and a
//! move that crosses two canvas edges at once is dropped rather than pinned
//! against both.

mod drag;
mod state;

pub use drag::{resize_corner, translate};
pub use state::{reset_rect, transition, CropEvent, EngineState};
