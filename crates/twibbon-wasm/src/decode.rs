//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG photo, applying EXIF orientation
//! - [`decode_asset`] - Decode an asset (overlay, placeholder) as-is
//! - [`get_orientation`] - Read the EXIF orientation value (1-8)
//! - [`validate_overlay`] - Check a user-supplied overlay PNG
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, validate_overlay } from '@twibbon/wasm';
//!
//! const photo = decode_image(new Uint8Array(await file.arrayBuffer()));
//! try {
//!   const frame = validate_overlay(new Uint8Array(await frameFile.arrayBuffer()));
//! } catch (message) {
//!   showToast(message);
//! }
//! ```

use crate::types::JsImage;
use twibbon_core::{decode, overlay};
use wasm_bindgen::prelude::*;

/// Decode a photo from bytes.
///
/// The EXIF orientation is applied so the image is upright.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsImage::from_rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image without touching its orientation.
#[wasm_bindgen]
pub fn decode_asset(bytes: &[u8]) -> Result<JsImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsImage::from_rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation value (1-8). Returns 1 when there is no EXIF data.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Validate a user-supplied overlay.
///
/// # Errors
///
/// Throws a user-facing message if the file is not a PNG or has no
/// transparent pixels.
#[wasm_bindgen]
pub fn validate_overlay(bytes: &[u8]) -> Result<JsImage, JsValue> {
    overlay::validate_overlay(bytes)
        .map(|o| JsImage::from_rgba(o.into_image()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
