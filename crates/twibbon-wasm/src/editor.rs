//! Editor session WASM bindings.
//!
//! [`JsEditor`] wraps a core `EditorSession` together with the preview
//! surface it paints into. The page forwards canvas events and animation
//! frames with `performance.now()` timestamps and blits the returned RGBA
//! buffer with `putImageData`.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditor, decode_asset } from '@twibbon/wasm';
//!
//! const editor = new JsEditor({ viewport_width: 500, viewport_height: 500 });
//! editor.set_default_overlay(decode_asset(frameBytes));
//! editor.set_watermark(rasterizeText(editor.watermark_text)); // required before export
//! editor.load_photo(photoBytes);
//!
//! canvas.onmousemove = (e) => {
//!   if (editor.pointer_move(e.offsetX, e.offsetY, performance.now())) paint();
//!   if (editor.request_frame()) requestAnimationFrame(loop);
//! };
//!
//! function loop(now: number) {
//!   if (editor.tick(now)) paint();
//!   if (editor.needs_frame()) requestAnimationFrame(loop);
//! }
//!
//! function paint() {
//!   const data = editor.render_image_data();
//!   ctx.putImageData(new ImageData(data, editor.width, editor.height), 0, 0);
//! }
//! ```

use crate::types::JsImage;
use twibbon_core::{
    EditorConfig, EditorSession, ExportStatus, Overlay, PixelSurface, SessionError, TouchPoint,
};
use wasm_bindgen::prelude::*;

/// Interactive editor for one canvas.
#[wasm_bindgen]
pub struct JsEditor {
    session: EditorSession,
    surface: PixelSurface,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor.
    ///
    /// # Arguments
    ///
    /// * `config` - Partial `EditorConfig` object; `undefined`/`null` uses
    ///   the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the object has the wrong shape or a size is zero.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };
        Self::with_config(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Preview width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.session.viewport().width
    }

    /// Preview height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.session.viewport().height
    }

    /// Decode a photo file and fit it to the canvas width.
    pub fn load_photo(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session
            .load_photo_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Use an already decoded photo.
    pub fn load_photo_image(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba_or_err()?;
        self.session
            .load_photo(rgba)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Validate a user PNG and use it as the overlay.
    ///
    /// # Errors
    ///
    /// Throws the user-facing rejection message; the current overlay is kept.
    pub fn load_overlay(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.session
            .load_overlay_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Bundled overlay, restored on reset.
    pub fn set_default_overlay(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba_or_err()?;
        self.session.set_default_overlay(Overlay::new(rgba));
        Ok(())
    }

    pub fn set_placeholder(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba_or_err()?;
        self.session.set_placeholder(rgba);
        Ok(())
    }

    /// Pre-rendered watermark stamp for exports.
    ///
    /// Draw `watermark_text` onto an offscreen canvas and pass its pixels.
    /// Exports are refused until a stamp is set.
    pub fn set_watermark(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let rgba = image.to_rgba_or_err()?;
        self.session.set_watermark(rgba);
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session.pointer_down(x, y);
    }

    /// Returns `true` if the canvas should be repainted.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.session.pointer_move(x, y, now_ms)
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.session.pointer_leave();
    }

    /// `coords` holds `[x0, y0, x1, y1, ...]` in client coordinates.
    pub fn touch_start(&mut self, coords: &[f64]) {
        self.session.touch_start(&touches_from_flat(coords));
    }

    /// Returns `true` if the canvas should be repainted.
    ///
    /// `origin_x`/`origin_y` are the canvas' client position
    /// (`getBoundingClientRect().left/top`).
    pub fn touch_move(
        &mut self,
        coords: &[f64],
        origin_x: f64,
        origin_y: f64,
        now_ms: f64,
    ) -> bool {
        self.session
            .touch_move(&touches_from_flat(coords), (origin_x, origin_y), now_ms)
    }

    pub fn touch_end(&mut self) {
        self.session.touch_end();
    }

    /// Advance the overlay fade. Returns `true` if the canvas should be repainted.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.session.tick(now_ms)
    }

    /// Whether the running frame loop should request another frame.
    pub fn needs_frame(&self) -> bool {
        self.session.needs_frame()
    }

    /// Whether an event handler should start the frame loop.
    ///
    /// Returns `true` at most once per loop, so it is safe to call on every
    /// input event.
    pub fn request_frame(&mut self) -> bool {
        self.session.request_frame()
    }

    /// Current overlay opacity
    #[wasm_bindgen(getter)]
    pub fn overlay_opacity(&self) -> f32 {
        self.session.overlay_opacity()
    }

    /// Paint the preview and return its RGBA pixels (a copy).
    pub fn render(&mut self) -> Vec<u8> {
        self.session.render(&mut self.surface);
        self.surface.as_raw().to_vec()
    }

    /// Paint the preview and return it ready for `new ImageData(...)`.
    pub fn render_image_data(&mut self) -> js_sys::Uint8ClampedArray {
        self.session.render(&mut self.surface);
        js_sys::Uint8ClampedArray::from(self.surface.as_raw())
    }

    /// Start the download countdown.
    ///
    /// # Errors
    ///
    /// Throws if no photo is loaded, no watermark stamp is set, or a countdown
    /// is already running.
    pub fn begin_export(&mut self, now_ms: f64) -> Result<(), JsValue> {
        self.session
            .begin_export(now_ms)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance the countdown. Returns the PNG bytes once, when it finishes.
    pub fn poll_export(&mut self, now_ms: f64) -> Result<Option<Vec<u8>>, JsValue> {
        self.poll_png(now_ms)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Whole seconds left on the countdown, or `undefined`.
    pub fn countdown_remaining(&self, now_ms: f64) -> Option<u32> {
        self.session.countdown_remaining(now_ms)
    }

    /// Text to rasterize for `set_watermark`
    #[wasm_bindgen(getter)]
    pub fn watermark_text(&self) -> String {
        self.session.config().watermark_text.clone()
    }

    /// Whether a watermark stamp must still be provided
    #[wasm_bindgen(getter)]
    pub fn needs_watermark(&self) -> bool {
        self.session.needs_watermark()
    }

    /// Suggested download file name
    #[wasm_bindgen(getter)]
    pub fn export_file_name(&self) -> String {
        self.session.config().export_file_name.clone()
    }

    /// "empty", "editing", "countingDown" or "downloaded"
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.session.phase().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn show_upload(&self) -> bool {
        self.session.phase().show_upload()
    }

    #[wasm_bindgen(getter)]
    pub fn show_overlay_picker(&self) -> bool {
        self.session.phase().show_overlay_picker()
    }

    #[wasm_bindgen(getter)]
    pub fn show_download(&self) -> bool {
        self.session.phase().show_download()
    }

    #[wasm_bindgen(getter)]
    pub fn download_enabled(&self) -> bool {
        self.session.phase().download_enabled()
    }

    #[wasm_bindgen(getter)]
    pub fn show_countdown(&self) -> bool {
        self.session.phase().show_countdown()
    }

    #[wasm_bindgen(getter)]
    pub fn show_reset(&self) -> bool {
        self.session.phase().show_reset()
    }

    /// Drop the photo and return to the initial state.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

impl JsEditor {
    pub(crate) fn with_config(config: EditorConfig) -> Result<Self, SessionError> {
        let session = EditorSession::new(config)?;
        let viewport = session.viewport();
        let surface = PixelSurface::new(viewport.width, viewport.height)
            .with_filter(session.config().filter);
        Ok(Self { session, surface })
    }

    fn poll_png(&mut self, now_ms: f64) -> Result<Option<Vec<u8>>, SessionError> {
        match self.session.poll_export(now_ms)? {
            ExportStatus::Ready(exported) => Ok(Some(exported.png)),
            ExportStatus::Counting(_) | ExportStatus::Idle => Ok(None),
        }
    }
}

/// Pair up `[x0, y0, x1, y1, ...]`. A trailing odd value is ignored.
fn touches_from_flat(coords: &[f64]) -> Vec<TouchPoint> {
    coords
        .chunks_exact(2)
        .map(|c| TouchPoint::new(c[0], c[1]))
        .collect()
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_defaults() {
        let ed = JsEditor::new(JsValue::UNDEFINED).unwrap();
        assert_eq!((ed.width(), ed.height()), (500, 500));
    }

    #[wasm_bindgen_test]
    fn test_new_with_partial_config() {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"viewport_width".into(), &JsValue::from(320)).unwrap();
        let ed = JsEditor::new(obj.into()).unwrap();
        assert_eq!((ed.width(), ed.height()), (320, 500));
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_zero_size() {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"export_size".into(), &JsValue::from(0)).unwrap();
        assert!(JsEditor::new(obj.into()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_begin_export_without_photo() {
        let mut ed = JsEditor::new(JsValue::NULL).unwrap();
        let err = ed.begin_export(0.0).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "Please upload a photo first.");
    }

    #[wasm_bindgen_test]
    fn test_load_overlay_rejects_jpeg_bytes() {
        let mut ed = JsEditor::new(JsValue::NULL).unwrap();
        let err = ed.load_overlay(&[0xFF, 0xD8, 0xFF, 0xE0]).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "The overlay must be a PNG file.");
    }

    #[wasm_bindgen_test]
    fn test_render_image_data_length() {
        let mut ed = JsEditor::new(JsValue::NULL).unwrap();
        assert_eq!(ed.render_image_data().length(), 500 * 500 * 4);
    }
}
