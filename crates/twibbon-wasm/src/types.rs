//! WASM-compatible wrapper types for image data.
//!
//! Images cross the boundary as flat RGBA8 buffers, the same layout
//! `ImageData` uses, so JS can hand over `getImageData().data` directly.

use image::RgbaImage;
use wasm_bindgen::prelude::*;

/// An RGBA image for JavaScript.
///
/// The pixel data lives in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a JsImage from dimensions and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_rgba(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to a core image. Returns `None` if the buffer length does not
    /// match the dimensions.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_rgba(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    pub(crate) fn to_rgba_or_err(&self) -> Result<RgbaImage, JsValue> {
        self.to_rgba().ok_or_else(|| {
            JsValue::from_str(&format!(
                "Invalid pixel data: expected {} bytes for {}x{} RGBA, got {}",
                self.width as usize * self.height as usize * 4,
                self.width,
                self.height,
                self.pixels.len()
            ))
        })
    }
}
