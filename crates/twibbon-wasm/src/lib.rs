//! Twibbon WASM - WebAssembly bindings for the Twibbon frame editor
//!
//! This crate exposes twibbon-core to the browser page that hosts the
//! editor canvas.
//!
//! # Module Structure
//!
//! - `editor` - `JsEditor`, the interactive session (gestures, fade, export)
//! - `types` - WASM-compatible RGBA image wrapper
//! - `decode` - Photo decoding and overlay validation
//! - `encode` - PNG encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor, decode_asset } from '@twibbon/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor(undefined);
//! editor.set_default_overlay(decode_asset(await fetchBytes('twibbon.png')));
//! editor.load_photo(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod types;

// Re-export public types
pub use decode::{decode_asset, decode_image, get_orientation, validate_overlay};
pub use editor::JsEditor;
pub use encode::{encode_png, encode_png_from_image};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the panic hook and routes `log` records to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
