//! cropkit WASM - WebAssembly bindings for the crop engine
//!
//! This crate exposes a crop session to the JavaScript/TypeScript composer.
//! The session lives in WASM memory; the front end forwards layout and
//! pointer events to it and reads the rect back for drawing the overlay.
//!
//! # Module Structure
//!
//! - `session` - `JsCropSession` and the `JsCropRect` overlay snapshot
//! - `codec` - Decoding source bytes and encoding rendered crops
//! - `types` - WASM-compatible wrapper for image buffers
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, decode_image, encode_jpeg } from '@cropkit/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession();
//! session.set_canvas_size(canvas.width, canvas.height);
//! session.select_mode(2); // Square
//!
//! canvas.onpointerdown = (e) => session.drag_start(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.drag_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = () => session.drag_end();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const jpeg = encode_jpeg(session.crop(image), 90);
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;

mod codec;
mod session;
mod types;

pub use codec::{decode_image, encode_jpeg, encode_png};
pub use session::{JsCropRect, JsCropSession};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load).
///
/// Routes `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));

    // A second init (hot reload) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
