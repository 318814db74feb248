//! Interactive viewport transform: pan, pinch-zoom and export-space mapping.
//!
//! The user photo is drawn onto the on-screen canvas through a single affine
//! map from photo pixels to screen pixels:
//!
//! ```text
//! screen = photo * scale + offset
//! ```
//!
//! # Coordinate System
//!
//! - Photo space is the photo's native pixel grid, origin top-left
//! - Screen space is the on-screen canvas, origin top-left
//! - Export space is an `export_size x export_size` square that reproduces the
//!   on-screen framing at a higher resolution
//!
//! Offsets are unconstrained: the photo may be dragged fully out of view.

mod transform;
mod types;

pub use transform::ViewportTransform;
pub use types::{Transform, TransformError, Viewport, MIN_SCALE};
