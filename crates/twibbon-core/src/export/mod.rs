//! High-resolution export.
//!
//! The export canvas is a square of `export_size` pixels. The photo is drawn
//! through the on-screen transform rescaled to export space, so the saved
//! image shows exactly what the user framed. The overlay is drawn at full
//! opacity regardless of any fade in progress.

mod countdown;

pub use countdown::{CountdownStatus, ExportCountdown};

use image::RgbaImage;

use crate::overlay::Overlay;
use crate::render::{redraw, Frame, InterpolationFilter, PixelSurface, RasterSurface};
use crate::viewport::{TransformError, Viewport, ViewportTransform};

/// A mark stamped into the bottom-right corner of every export.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    stamp: RgbaImage,
    margin: u32,
    opacity: f32,
}

impl Watermark {
    /// Create a watermark from a pre-rendered RGBA stamp.
    pub fn new(stamp: RgbaImage, margin: u32, opacity: f32) -> Self {
        Self {
            stamp,
            margin,
            opacity,
        }
    }

    /// The stamp pixels.
    pub fn stamp(&self) -> &RgbaImage {
        &self.stamp
    }

    /// Top-left corner of the stamp on a `size x size` canvas.
    pub fn position(&self, size: u32) -> (f64, f64) {
        let (w, h) = self.stamp.dimensions();
        let x = size as f64 - self.margin as f64 - w as f64;
        let y = size as f64 - self.margin as f64 - h as f64;
        (x, y)
    }

    fn draw(&self, surface: &mut PixelSurface) {
        let (size, _) = surface.size();
        let (x, y) = self.position(size);
        let (w, h) = self.stamp.dimensions();
        surface.with_alpha(self.opacity, |s| {
            s.draw_image(&self.stamp, x, y, w as f64, h as f64);
        });
    }
}

/// Render the final square image.
///
/// # Arguments
///
/// * `photo` - The user photo
/// * `overlay` - The overlay frame, stretched over the whole export
/// * `transform` - The on-screen photo transform
/// * `viewport` - On-screen canvas size and export size
/// * `watermark` - Optional stamp drawn last
/// * `filter` - Interpolation for the scaled draws
///
/// # Errors
///
/// Returns `TransformError::InvalidViewportWidth` if the viewport width is
/// zero.
pub fn compose_export(
    photo: &RgbaImage,
    overlay: &Overlay,
    transform: &ViewportTransform,
    viewport: Viewport,
    watermark: Option<&Watermark>,
    filter: InterpolationFilter,
) -> Result<RgbaImage, TransformError> {
    let size = viewport.export_size;
    let export_transform = transform.to_export_space(size as f64, viewport.width as f64)?;

    let mut surface = PixelSurface::new(size, size).with_filter(filter);
    let frame = Frame {
        photo: Some(photo),
        placeholder: None,
        overlay: Some(overlay.image()),
        transform: export_transform,
        overlay_opacity: 1.0,
        placeholder_opacity: 0.0,
    };
    redraw(&mut surface, &frame);

    if let Some(mark) = watermark {
        mark.draw(&mut surface);
    }

    log::info!("Composed {}x{} export", size, size);
    Ok(surface.into_image())
}
