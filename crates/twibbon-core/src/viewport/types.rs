//! Core types for the viewport transform.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest scale a transform is allowed to hold.
///
/// Pathological pinch factors are clamped here so later zoom corrections
/// never divide by zero.
pub const MIN_SCALE: f64 = 1e-4;

/// Error types for viewport transform operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// The pinch baseline distance is zero, negative or not finite.
    #[error("Degenerate pinch: baseline distance {prev_distance}, new distance {new_distance}")]
    DegeneratePinch { prev_distance: f64, new_distance: f64 },

    /// The photo has no usable width to fit against.
    #[error("Invalid photo width: {0} (must be positive)")]
    InvalidPhotoWidth(f64),

    /// The viewport has no usable width to scale from.
    #[error("Invalid viewport width: {0} (must be positive)")]
    InvalidViewportWidth(f64),
}

/// Affine map from photo pixels to canvas pixels.
///
/// `screen = photo * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Uniform scale factor (always > 0).
    pub scale: f64,
    /// Horizontal offset of the photo's top-left corner in canvas pixels.
    pub offset_x: f64,
    /// Vertical offset of the photo's top-left corner in canvas pixels.
    pub offset_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Unit scale, no offset.
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Create a new transform.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Map a photo-space point to canvas space.
    #[inline]
    pub fn photo_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Map a canvas-space point back to photo space.
    #[inline]
    pub fn screen_to_photo(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.offset_x) / self.scale,
            (y - self.offset_y) / self.scale,
        )
    }

    /// Multiply scale and both offsets by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            offset_x: self.offset_x * factor,
            offset_y: self.offset_y * factor,
        }
    }

    /// Size of a `width x height` photo once drawn through this transform.
    pub fn scaled_size(&self, width: u32, height: u32) -> (f64, f64) {
        (width as f64 * self.scale, height as f64 * self.scale)
    }
}

/// Fixed canvas dimensions for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// On-screen canvas width in pixels.
    pub width: u32,
    /// On-screen canvas height in pixels.
    pub height: u32,
    /// Side length of the square export canvas in pixels.
    pub export_size: u32,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(width: u32, height: u32, export_size: u32) -> Self {
        Self {
            width,
            height,
            export_size,
        }
    }

    /// Factor that maps on-screen pixels to export pixels.
    pub fn export_factor(&self) -> f64 {
        self.export_size as f64 / self.width as f64
    }
}
