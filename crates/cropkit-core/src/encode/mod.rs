//! Encoding rendered crops for upload.
//!
//! Writing the bytes somewhere (and handing back a URI) belongs to the caller.
//! Encoding is a pure function of the image, so a failure here never touches
//! the crop session.

mod output;

pub use output::{encode, EncodeError, ExportFormat};
