//! PagePress WASM - WebAssembly bindings for the PagePress editor
//!
//! This crate exposes `pagepress-core` to the hosting page: a stateful
//! [`EditorSession`] that owns uploads, edit parameters and page order, plus
//! a couple of stateless helpers.
//!
//! # Module Structure
//!
//! - `session` - The editor session (uploads, edits, order, export)
//! - `pipeline` - Stateless render and PDF helpers
//! - `types` - WASM-compatible wrapper types for rendered images and PDFs
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditorSession } from '@pagepress/wasm';
//!
//! await init();
//!
//! const session = new EditorSession({ log_level: 'debug' });
//! for (const file of input.files) {
//!   session.addUpload(file.name, new Uint8Array(await file.arrayBuffer()));
//! }
//! const preview = session.setBrightness('scan.jpg', 20);
//! session.applyToAll('scan.jpg');
//! session.setOrder(['scan.jpg', 'receipt.png']);
//! const pdf = session.exportCombined();
//! download(pdf.bytes(), pdf.name);
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod pipeline;
mod session;
mod types;

pub use pipeline::{render_image, render_to_pdf};
pub use session::EditorSession;
pub use types::{JsPdfFile, JsRenderedImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
