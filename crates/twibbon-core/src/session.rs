//! Editing session.
//!
//! [`EditorSession`] owns all editor state: the photo and overlay, the
//! viewport transform, the overlay fade, the idle-restore debounce, gesture
//! tracking and the download countdown. The host forwards input events and
//! frame callbacks with a timestamp; nothing here keeps its own clock.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, EditorConfig};
use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_png_image, EncodeError};
use crate::export::{compose_export, CountdownStatus, ExportCountdown, Watermark};
use crate::gesture::{GestureAction, GestureTracker, TouchPoint};
use crate::idle::IdleRestoreTimer;
use crate::opacity::OpacityAnimator;
use crate::overlay::{validate_overlay, Overlay, OverlayError};
use crate::render::{redraw, Frame, RasterSurface};
use crate::viewport::{TransformError, Viewport, ViewportTransform};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Export requested before a photo was loaded.
    #[error("Please upload a photo first.")]
    MissingPhoto,

    /// Export requested with no overlay available.
    #[error("No overlay frame is loaded.")]
    MissingOverlay,

    /// Export requested while a countdown is already running.
    #[error("An export is already in progress.")]
    ExportInProgress,

    /// Export requested before the watermark stamp was provided.
    #[error("No watermark stamp is set.")]
    MissingWatermark,
}

/// Which actions the page should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UiPhase {
    /// No photo yet.
    #[default]
    Empty,
    /// A photo is loaded and can be framed.
    Editing,
    /// Download pressed, waiting for the countdown.
    CountingDown,
    /// The export was produced.
    Downloaded,
}

impl UiPhase {
    /// Show the photo upload action.
    pub fn show_upload(self) -> bool {
        self == UiPhase::Empty
    }

    /// Show the custom overlay picker.
    pub fn show_overlay_picker(self) -> bool {
        self != UiPhase::Empty
    }

    /// Show the download action.
    pub fn show_download(self) -> bool {
        matches!(self, UiPhase::Editing | UiPhase::CountingDown)
    }

    /// Whether the download action can be pressed.
    pub fn download_enabled(self) -> bool {
        self == UiPhase::Editing
    }

    /// Show the countdown text.
    pub fn show_countdown(self) -> bool {
        self == UiPhase::CountingDown
    }

    /// Show the reset action.
    pub fn show_reset(self) -> bool {
        self == UiPhase::Downloaded
    }

    /// Lowercase name for hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            UiPhase::Empty => "empty",
            UiPhase::Editing => "editing",
            UiPhase::CountingDown => "countingDown",
            UiPhase::Downloaded => "downloaded",
        }
    }
}

/// An encoded export ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Suggested download name.
    pub file_name: String,
    /// PNG file bytes.
    pub png: Vec<u8>,
}

/// Result of polling the download countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export pending.
    Idle,
    /// Whole seconds until the export is produced.
    Counting(u32),
    /// The export was just produced.
    Ready(ExportedImage),
}

/// All state for one editor canvas.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    viewport: Viewport,
    transform: ViewportTransform,
    animator: OpacityAnimator,
    idle: IdleRestoreTimer,
    gestures: GestureTracker,
    countdown: ExportCountdown,
    photo: Option<RgbaImage>,
    overlay: Option<Overlay>,
    default_overlay: Option<Overlay>,
    placeholder: Option<RgbaImage>,
    watermark: Option<Watermark>,
    phase: UiPhase,
    frame_scheduled: bool,
    last_tick_ms: Option<f64>,
}

impl EditorSession {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the configuration is invalid.
    pub fn new(config: EditorConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport(),
            countdown: ExportCountdown::new(config.countdown_secs),
            config,
            transform: ViewportTransform::new(),
            animator: OpacityAnimator::new(),
            idle: IdleRestoreTimer::new(),
            gestures: GestureTracker::new(),
            photo: None,
            overlay: None,
            default_overlay: None,
            placeholder: None,
            watermark: None,
            phase: UiPhase::Empty,
            frame_scheduled: false,
            last_tick_ms: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn phase(&self) -> UiPhase {
        self.phase
    }

    /// Current overlay opacity.
    pub fn overlay_opacity(&self) -> f32 {
        self.animator.opacity()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Use `photo` and fit it to the viewport width.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Transform` if the photo has zero width. The
    /// previous photo is kept in that case.
    pub fn load_photo(&mut self, photo: RgbaImage) -> Result<(), SessionError> {
        let (width, height) = photo.dimensions();
        self.transform
            .reset(width as f64, height as f64, self.viewport.width as f64)?;

        log::info!("Loaded {}x{} photo", width, height);
        self.photo = Some(photo);
        self.gestures.reset();
        self.countdown.cancel();
        self.phase = UiPhase::Editing;
        Ok(())
    }

    /// Decode `bytes` (applying EXIF orientation) and load the result.
    pub fn load_photo_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let photo = decode_image(bytes)?;
        self.load_photo(photo)
    }

    /// Replace the current overlay. The phase is left as it is.
    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    /// Validate a user-supplied PNG and use it as the overlay.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Overlay` if the file is rejected; the current
    /// overlay stays in place.
    pub fn load_overlay_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let overlay = validate_overlay(bytes)?;
        self.set_overlay(overlay);
        Ok(())
    }

    /// Set the overlay restored by [`reset`](Self::reset).
    ///
    /// Also becomes the current overlay if none is set yet.
    pub fn set_default_overlay(&mut self, overlay: Overlay) {
        if self.overlay.is_none() {
            self.overlay = Some(overlay.clone());
        }
        self.default_overlay = Some(overlay);
    }

    /// Image shown while no photo is loaded.
    pub fn set_placeholder(&mut self, placeholder: RgbaImage) {
        self.placeholder = Some(placeholder);
    }

    /// Stamp drawn into every export, positioned from the config.
    ///
    /// The stamp is the rasterized `watermark_text`. Exports are refused
    /// until one is set, unless `watermark_text` is empty.
    pub fn set_watermark(&mut self, stamp: RgbaImage) {
        self.watermark = Some(Watermark::new(
            stamp,
            self.config.watermark_margin,
            self.config.watermark_opacity,
        ));
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gestures.pointer_down(x, y);
    }

    /// Returns `true` if the frame changed and should be redrawn.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        let action = self.gestures.pointer_move(x, y);
        self.apply(action, now_ms)
    }

    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.gestures.pointer_leave();
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        self.gestures.touch_start(touches);
    }

    /// Returns `true` if the frame changed and should be redrawn.
    pub fn touch_move(
        &mut self,
        touches: &[TouchPoint],
        canvas_origin: (f64, f64),
        now_ms: f64,
    ) -> bool {
        let action = self.gestures.touch_move(touches, canvas_origin);
        self.apply(action, now_ms)
    }

    pub fn touch_end(&mut self) {
        self.gestures.touch_end();
    }

    fn apply(&mut self, action: Option<GestureAction>, now_ms: f64) -> bool {
        let Some(action) = action else {
            return false;
        };
        if self.photo.is_none() {
            return false;
        }

        match action {
            GestureAction::Pan { dx, dy } => self.transform.pan(dx, dy),
            GestureAction::Pinch {
                prev_distance,
                new_distance,
                center_x,
                center_y,
            } => {
                if let Err(e) =
                    self.transform
                        .pinch_zoom(prev_distance, new_distance, center_x, center_y)
                {
                    log::debug!("Dropped pinch sample: {}", e);
                    return false;
                }
            }
        }

        self.animator.set_target(self.config.interaction_opacity);
        self.idle.schedule(now_ms, self.config.restore_delay_ms);
        true
    }

    /// Advance timers and the overlay fade to `now_ms`.
    ///
    /// Call once per animation frame. Returns `true` if the overlay opacity
    /// changed and the frame should be redrawn. A timestamp at or before the
    /// previous tick steps nothing.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.last_tick_ms.is_some_and(|last| now_ms <= last) {
            return false;
        }
        self.last_tick_ms = Some(now_ms);

        if self.idle.poll(now_ms) {
            self.animator.set_target(1.0);
        }
        let changed = self.animator.tick();
        if !self.needs_frame() {
            self.frame_scheduled = false;
        }
        changed
    }

    /// Whether there is work left for the frame loop.
    ///
    /// The running loop checks this after each `tick` to decide whether to
    /// request another frame.
    pub fn needs_frame(&self) -> bool {
        self.animator.is_animating() || self.idle.is_pending() || self.countdown.is_running()
    }

    /// Whether the host should start a frame loop now.
    ///
    /// Returns `true` only when there is work and no loop is running. The
    /// loop counts as running until a `tick` leaves nothing to do, so event
    /// handlers can call this on every event without stacking loops.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_scheduled || !self.needs_frame() {
            return false;
        }
        self.frame_scheduled = true;
        true
    }

    /// Paint the current state onto `surface`.
    pub fn render<S>(&self, surface: &mut S)
    where
        S: RasterSurface<Source = RgbaImage>,
    {
        let frame = Frame {
            photo: self.photo.as_ref(),
            placeholder: self.placeholder.as_ref(),
            overlay: self.overlay.as_ref().map(Overlay::image),
            transform: self.transform.transform(),
            overlay_opacity: self.animator.opacity(),
            placeholder_opacity: self.config.placeholder_opacity,
        };
        redraw(surface, &frame);
    }

    /// Start the download countdown.
    ///
    /// # Errors
    ///
    /// Returns `MissingPhoto` or `MissingOverlay` if there is nothing to
    /// export, `MissingWatermark` if the stamp has not been provided, and
    /// `ExportInProgress` if a countdown is already running.
    pub fn begin_export(&mut self, now_ms: f64) -> Result<(), SessionError> {
        self.check_exportable()?;
        if self.countdown.is_running() {
            return Err(SessionError::ExportInProgress);
        }

        self.countdown.start(now_ms);
        self.phase = UiPhase::CountingDown;
        log::info!(
            "Export countdown started ({} s)",
            self.countdown.duration_secs()
        );
        Ok(())
    }

    /// Seconds left on the countdown, if one is running.
    pub fn countdown_remaining(&self, now_ms: f64) -> Option<u32> {
        self.countdown.remaining(now_ms)
    }

    /// Advance the countdown and produce the export when it finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if composing or encoding the export fails. The phase
    /// returns to `Editing` so the user can try again.
    pub fn poll_export(&mut self, now_ms: f64) -> Result<ExportStatus, SessionError> {
        match self.countdown.poll(now_ms) {
            None => Ok(ExportStatus::Idle),
            Some(CountdownStatus::Remaining(n)) => Ok(ExportStatus::Counting(n)),
            Some(CountdownStatus::Ready) => match self.export_png() {
                Ok(png) => {
                    self.phase = UiPhase::Downloaded;
                    log::info!("Export ready ({} bytes)", png.len());
                    Ok(ExportStatus::Ready(ExportedImage {
                        file_name: self.config.export_file_name.clone(),
                        png,
                    }))
                }
                Err(e) => {
                    self.phase = UiPhase::Editing;
                    log::warn!("Export failed: {}", e);
                    Err(e)
                }
            },
        }
    }

    /// Whether a watermark stamp is required and missing.
    pub fn needs_watermark(&self) -> bool {
        self.watermark.is_none() && !self.config.watermark_text.is_empty()
    }

    fn check_exportable(&self) -> Result<(), SessionError> {
        if self.photo.is_none() {
            return Err(SessionError::MissingPhoto);
        }
        if self.overlay.is_none() {
            return Err(SessionError::MissingOverlay);
        }
        if self.needs_watermark() {
            return Err(SessionError::MissingWatermark);
        }
        Ok(())
    }

    /// Compose and encode the export immediately, skipping the countdown.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        self.check_exportable()?;
        let photo = self.photo.as_ref().ok_or(SessionError::MissingPhoto)?;
        let overlay = self.overlay.as_ref().ok_or(SessionError::MissingOverlay)?;

        let image = compose_export(
            photo,
            overlay,
            &self.transform,
            self.viewport,
            self.watermark.as_ref(),
            self.config.filter,
        )?;
        Ok(encode_png_image(&image)?)
    }

    /// Return to the empty state.
    ///
    /// Cancels any pending fade-in and countdown, drops the photo and
    /// restores the default overlay at full opacity.
    pub fn reset(&mut self) {
        self.idle.cancel();
        self.animator.reset();
        self.countdown.cancel();
        self.gestures.reset();
        self.transform.set_identity();
        self.photo = None;
        self.overlay = self.default_overlay.clone();
        self.phase = UiPhase::Empty;
        log::debug!("Session reset");
    }
}
