//! Twibbon Core - Frame overlay editor library
//!
//! This crate provides the core of the Twibbon editor: the pan/pinch viewport
//! transform, the overlay fade animation and its idle-restore debounce,
//! frame rendering, overlay validation and the high-resolution PNG export.
//!
//! Everything is driven by explicit timestamps from the host, so the same
//! code runs natively in tests and in the browser through `twibbon-wasm`.

pub mod config;
pub mod decode;
pub mod encode;
pub mod export;
pub mod gesture;
pub mod idle;
pub mod opacity;
pub mod overlay;
pub mod render;
pub mod session;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use export::{compose_export, CountdownStatus, ExportCountdown, Watermark};
pub use gesture::{GestureAction, GestureTracker, TouchPoint};
pub use idle::IdleRestoreTimer;
pub use opacity::{AnimationState, OpacityAnimator};
pub use overlay::{validate_overlay, Overlay, OverlayError};
pub use render::{redraw, Frame, InterpolationFilter, PixelSurface, RasterSurface};
pub use session::{EditorSession, ExportStatus, ExportedImage, SessionError, UiPhase};
pub use viewport::{Transform, TransformError, Viewport, ViewportTransform};
