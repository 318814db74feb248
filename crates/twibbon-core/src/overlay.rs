//! Overlay frames.
//!
//! An overlay is drawn over the whole canvas on top of the photo, so a
//! user-supplied one must be a PNG and must have at least one pixel that is
//! not fully opaque. Otherwise it would simply hide the photo.

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// Reasons a user-supplied overlay is rejected.
///
/// The messages are written for the end user.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The file is not a PNG.
    #[error("The overlay must be a PNG file.")]
    NotPng,

    /// The PNG could not be decoded.
    #[error("The overlay could not be read: {0}")]
    Decode(String),

    /// Every pixel is fully opaque.
    #[error("The overlay must have transparent areas.")]
    NoTransparency,
}

/// A decoded overlay frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    image: RgbaImage,
}

impl Overlay {
    /// Wrap an image without validation (for the bundled default frame).
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Wrap an image, rejecting it if it has no transparent pixels.
    pub fn from_image(image: RgbaImage) -> Result<Self, OverlayError> {
        if !has_transparency(&image) {
            return Err(OverlayError::NoTransparency);
        }
        Ok(Self { image })
    }

    /// The overlay pixels.
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take the overlay pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Returns `true` if any pixel has alpha below 255.
pub fn has_transparency(image: &RgbaImage) -> bool {
    image.pixels().any(|p| p[3] < u8::MAX)
}

/// Validate and decode a user-supplied overlay.
///
/// # Errors
///
/// Returns `OverlayError::NotPng` if the bytes are not a PNG,
/// `OverlayError::Decode` if the PNG is corrupted, and
/// `OverlayError::NoTransparency` if every pixel is fully opaque.
pub fn validate_overlay(bytes: &[u8]) -> Result<Overlay, OverlayError> {
    if !matches!(image::guess_format(bytes), Ok(ImageFormat::Png)) {
        log::warn!("Rejected overlay: not a PNG");
        return Err(OverlayError::NotPng);
    }

    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| OverlayError::Decode(e.to_string()))?
        .into_rgba8();

    Overlay::from_image(image).inspect_err(|_| {
        log::warn!("Rejected overlay: no transparent pixels");
    })
}
