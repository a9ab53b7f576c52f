//! cropkit Core - interactive image crop engine
//!
//! This crate provides the gesture-driven crop rectangle used by the post
//! composer: hit-testing pointer-down positions, moving and corner-resizing
//! the rect under free, 4:5 post and square modes, and rendering the final
//! crop from the source image.
//!
//! # Module Structure
//!
//! - `geometry` - Point, size and rect value types
//! - `touch` - Pointer-down classification (move / corner resize / none)
//! - `aspect` - Crop modes and the aspect-ratio constraint
//! - `engine` - Immutable engine state and pure transitions
//! - `session` - Mutable façade owning one engine state
//! - `render` - Final crop rendering with graceful fallback
//! - `decode` / `encode` - Image buffers, decoding, resampling and export
//! - `config` - Engine tunables, loadable from TOML
//!
//! # Example
//!
//! ```ignore
//! use cropkit_core::{CropMode, CropSession};
//!
//! let mut session = CropSession::default();
//! session.set_canvas_size(1000.0, 1000.0);
//! session.select_mode(CropMode::Square);
//!
//! session.drag_start(950.0, 950.0);
//! session.drag_move(900.0, 920.0);
//! session.drag_end();
//!
//! let output = session.crop(&source);
//! ```

pub mod aspect;
pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod geometry;
pub mod render;
pub mod session;
pub mod touch;

pub use aspect::{constrain, CropMode, POST_RATIO};
pub use config::{ConfigError, EngineConfig, TargetSize};
pub use decode::{decode_image, DecodeError, DecodedImage, FilterType};
pub use encode::{encode, EncodeError, ExportFormat};
pub use engine::{reset_rect, transition, CropEvent, EngineState};
pub use geometry::{Point, Rect, Size};
pub use render::{render, scale_to_canvas, CropRequest};
pub use session::CropSession;
pub use touch::{classify, Corner, DragMode};
