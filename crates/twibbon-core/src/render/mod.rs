//! Frame rendering.
//!
//! A frame is drawn in three layers onto any [`RasterSurface`]:
//! 1. The photo, through the viewport transform (or the placeholder when no
//!    photo is loaded, fitted and centred at reduced opacity)
//! 2. The overlay frame, stretched to the full surface at the animated opacity
//!
//! The renderer only issues `clear`, `draw_image` and `with_alpha` calls; the
//! same code paints the on-screen preview and the high-resolution export.

mod sample;
mod surface;

pub use sample::{sample, InterpolationFilter};
pub use surface::{ImageSource, PixelSurface, RasterSurface};

use crate::viewport::Transform;

/// Everything needed to paint one frame.
#[derive(Debug)]
pub struct Frame<'a, S: ?Sized> {
    /// User photo, drawn through `transform`.
    pub photo: Option<&'a S>,
    /// Shown instead of the photo when none is loaded.
    pub placeholder: Option<&'a S>,
    /// Overlay frame, stretched over the whole surface.
    pub overlay: Option<&'a S>,
    /// Photo-to-surface transform.
    pub transform: Transform,
    /// Overlay opacity (0.0 to 1.0).
    pub overlay_opacity: f32,
    /// Placeholder opacity (0.0 to 1.0).
    pub placeholder_opacity: f32,
}

impl<S: ?Sized> Clone for Frame<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Frame<'_, S> {}

/// Compute the centred "contain" rectangle for a `width x height` image on a
/// `surface_w x surface_h` surface.
///
/// Returns `(x, y, w, h)`.
pub fn fit_centered(
    width: u32,
    height: u32,
    surface_w: u32,
    surface_h: u32,
) -> (f64, f64, f64, f64) {
    let (w, h) = (width as f64, height as f64);
    let (sw, sh) = (surface_w as f64, surface_h as f64);
    let ratio = (sw / w).min(sh / h);
    let (fit_w, fit_h) = (w * ratio, h * ratio);
    ((sw - fit_w) / 2.0, (sh - fit_h) / 2.0, fit_w, fit_h)
}

/// Clear `surface` and paint `frame` onto it.
pub fn redraw<R>(surface: &mut R, frame: &Frame<'_, R::Source>)
where
    R: RasterSurface,
{
    surface.clear();
    let (surface_w, surface_h) = surface.size();

    if let Some(photo) = frame.photo {
        let (pw, ph) = photo.dimensions();
        let (w, h) = frame.transform.scaled_size(pw, ph);
        surface.draw_image(photo, frame.transform.offset_x, frame.transform.offset_y, w, h);
    } else if let Some(placeholder) = frame.placeholder {
        let (pw, ph) = placeholder.dimensions();
        if pw > 0 && ph > 0 {
            let (x, y, w, h) = fit_centered(pw, ph, surface_w, surface_h);
            surface.with_alpha(frame.placeholder_opacity, |s| {
                s.draw_image(placeholder, x, y, w, h);
            });
        }
    }

    if let Some(overlay) = frame.overlay {
        surface.with_alpha(frame.overlay_opacity, |s| {
            s.draw_image(overlay, 0.0, 0.0, surface_w as f64, surface_h as f64);
        });
    }
}
