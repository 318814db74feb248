//! PNG encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_image`] - Encode a JsImage to PNG bytes

use crate::types::JsImage;
use twibbon_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
///
/// # Example
///
/// ```typescript
/// const { data, width, height } = ctx.getImageData(0, 0, w, h);
/// const png = encode_png(new Uint8Array(data.buffer), width, height);
/// ```
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsImage) -> Result<Vec<u8>, JsValue> {
    let rgba = image.to_rgba_or_err()?;
    encode::encode_png_image(&rgba).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 16 * 16 * 4];
        let png = encode_png(&pixels, 16, 16).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        assert!(encode_png(&[0u8; 16], 0, 4).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![0u8; 8 * 8 * 3]; // RGB, not RGBA
        assert!(encode_png(&pixels, 8, 8).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsImage::new(4, 4, vec![200u8; 4 * 4 * 4]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let short = JsImage::new(4, 4, vec![0u8; 3]);
        assert!(encode_png_from_image(&short).is_err());
    }
}
