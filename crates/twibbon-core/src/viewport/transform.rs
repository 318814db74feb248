//! Pan and pinch-zoom state for the user photo.
//!
//! # Zooming About a Fixed Point
//!
//! A pinch multiplies the scale by `new_distance / prev_distance`. On its own
//! that would zoom toward the canvas origin, so the offset is corrected so the
//! photo point under the gesture centroid stays put:
//!
//! ```text
//! offset -= (center - offset) * (scale / prev_scale - 1)
//! ```

use super::types::{Transform, TransformError, MIN_SCALE};

/// Owns the scale/offset state of the photo on the on-screen canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportTransform {
    current: Transform,
}

impl ViewportTransform {
    /// Create a transform at identity (scale 1, no offset).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current photo-to-canvas transform.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.current
    }

    /// Current scale factor.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.current.scale
    }

    /// Current offset as `(x, y)`.
    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.current.offset_x, self.current.offset_y)
    }

    /// Restore identity (scale 1, no offset).
    pub fn set_identity(&mut self) {
        self.current = Transform::IDENTITY;
    }

    /// Fit the photo's width to the viewport width, anchored top-left.
    ///
    /// # Arguments
    ///
    /// * `photo_width` - Native photo width in pixels
    /// * `photo_height` - Native photo height in pixels
    /// * `viewport_width` - On-screen canvas width in pixels
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidPhotoWidth` if `photo_width` is not
    /// positive, or `TransformError::InvalidViewportWidth` if `viewport_width`
    /// is not positive. State is left untouched on error.
    pub fn reset(
        &mut self,
        photo_width: f64,
        photo_height: f64,
        viewport_width: f64,
    ) -> Result<(), TransformError> {
        if !(photo_width > 0.0 && photo_width.is_finite()) {
            return Err(TransformError::InvalidPhotoWidth(photo_width));
        }
        if !(viewport_width > 0.0 && viewport_width.is_finite()) {
            return Err(TransformError::InvalidViewportWidth(viewport_width));
        }

        self.current = Transform::new(viewport_width / photo_width, 0.0, 0.0);
        log::debug!(
            "Fit {}x{} photo to {} px wide viewport (scale {})",
            photo_width,
            photo_height,
            viewport_width,
            self.current.scale
        );
        Ok(())
    }

    /// Move the photo by `(dx, dy)` canvas pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.current.offset_x += dx;
        self.current.offset_y += dy;
    }

    /// Zoom about a fixed canvas point from a two-finger pinch sample.
    ///
    /// # Arguments
    ///
    /// * `prev_distance` - Finger distance at the previous sample
    /// * `new_distance` - Finger distance at this sample
    /// * `center_x`, `center_y` - Gesture centroid in canvas pixels
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DegeneratePinch` when `prev_distance` is not
    /// positive or the resulting zoom factor is not a finite, non-negative
    /// number. Callers are expected to only pinch after two touch samples
    /// exist; the error keeps `NaN`/`Infinity` out of the transform if they
    /// don't.
    ///
    /// The resulting scale is clamped to [`MIN_SCALE`].
    pub fn pinch_zoom(
        &mut self,
        prev_distance: f64,
        new_distance: f64,
        center_x: f64,
        center_y: f64,
    ) -> Result<(), TransformError> {
        let degenerate = TransformError::DegeneratePinch {
            prev_distance,
            new_distance,
        };
        if !(prev_distance > 0.0 && prev_distance.is_finite()) {
            return Err(degenerate);
        }

        let zoom = new_distance / prev_distance;
        if !(zoom >= 0.0 && zoom.is_finite()) {
            return Err(degenerate);
        }

        let prev_scale = self.current.scale;
        let scale = (prev_scale * zoom).max(MIN_SCALE);
        let ratio = scale / prev_scale - 1.0;

        self.current.scale = scale;
        self.current.offset_x -= (center_x - self.current.offset_x) * ratio;
        self.current.offset_y -= (center_y - self.current.offset_y) * ratio;
        Ok(())
    }

    /// Map the on-screen framing to an `export_size x export_size` canvas.
    ///
    /// Drawing the photo through the returned transform onto the export canvas
    /// reproduces the on-screen framing for any `export_size`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidViewportWidth` if `viewport_width` is
    /// not positive.
    pub fn to_export_space(
        &self,
        export_size: f64,
        viewport_width: f64,
    ) -> Result<Transform, TransformError> {
        if !(viewport_width > 0.0 && viewport_width.is_finite()) {
            return Err(TransformError::InvalidViewportWidth(viewport_width));
        }
        Ok(self.current.scaled(export_size / viewport_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_new_is_identity() {
        let vt = ViewportTransform::new();
        assert_eq!(vt.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_reset_fits_width() {
        let mut vt = ViewportTransform::new();
        vt.pan(30.0, 40.0);
        vt.reset(2000.0, 1000.0, 500.0).unwrap();
        assert_eq!(vt.scale(), 0.25);
        assert_eq!(vt.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_reset_rejects_zero_width() {
        let mut vt = ViewportTransform::new();
        vt.pan(5.0, 5.0);
        let before = vt.transform();

        let result = vt.reset(0.0, 100.0, 500.0);
        assert_eq!(result, Err(TransformError::InvalidPhotoWidth(0.0)));
        assert_eq!(vt.transform(), before);
    }

    #[test]
    fn test_reset_rejects_zero_viewport() {
        let mut vt = ViewportTransform::new();
        assert!(matches!(
            vt.reset(100.0, 100.0, 0.0),
            Err(TransformError::InvalidViewportWidth(_))
        ));
    }

    #[test]
    fn test_pan_accumulates() {
        let mut vt = ViewportTransform::new();
        vt.pan(10.0, -10.0);
        vt.pan(2.5, 0.5);
        assert_eq!(vt.offset(), (12.5, -9.5));
    }

    #[test]
    fn test_pan_unconstrained() {
        let mut vt = ViewportTransform::new();
        vt.pan(-1.0e6, 1.0e6);
        assert_eq!(vt.offset(), (-1.0e6, 1.0e6));
    }

    #[test]
    fn test_pinch_equal_distance_is_noop() {
        let mut vt = ViewportTransform::new();
        vt.reset(800.0, 600.0, 400.0).unwrap();
        vt.pan(13.0, 7.0);
        let before = vt.transform();

        vt.pinch_zoom(120.0, 120.0, 200.0, 150.0).unwrap();
        assert_eq!(vt.transform(), before);
    }

    #[test]
    fn test_pinch_zero_baseline_rejected() {
        let mut vt = ViewportTransform::new();
        let before = vt.transform();

        let result = vt.pinch_zoom(0.0, 50.0, 10.0, 10.0);
        assert!(matches!(result, Err(TransformError::DegeneratePinch { .. })));
        assert_eq!(vt.transform(), before);
        assert!(vt.scale().is_finite());
    }

    #[test]
    fn test_pinch_nan_rejected() {
        let mut vt = ViewportTransform::new();
        assert!(vt.pinch_zoom(f64::NAN, 50.0, 0.0, 0.0).is_err());
        assert!(vt.pinch_zoom(50.0, f64::NAN, 0.0, 0.0).is_err());
        assert!(vt.pinch_zoom(50.0, -10.0, 0.0, 0.0).is_err());
        assert_eq!(vt.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_pinch_to_zero_clamps_scale() {
        let mut vt = ViewportTransform::new();
        vt.pinch_zoom(100.0, 0.0, 50.0, 50.0).unwrap();
        assert_eq!(vt.scale(), MIN_SCALE);

        // A further pinch still has a positive scale to divide by
        vt.pinch_zoom(10.0, 20.0, 50.0, 50.0).unwrap();
        assert!(approx(vt.scale(), MIN_SCALE * 2.0));
        assert!(vt.offset().0.is_finite());
    }

    #[test]
    fn test_pinch_keeps_center_fixed() {
        let mut vt = ViewportTransform::new();
        vt.reset(1200.0, 900.0, 600.0).unwrap();
        vt.pan(-35.0, 20.0);

        let (cx, cy) = (180.0, 260.0);
        let anchor = vt.transform().screen_to_photo(cx, cy);

        vt.pinch_zoom(80.0, 200.0, cx, cy).unwrap();
        let (sx, sy) = vt.transform().photo_to_screen(anchor.0, anchor.1);
        assert!(approx(sx, cx), "x drifted: {} vs {}", sx, cx);
        assert!(approx(sy, cy), "y drifted: {} vs {}", sy, cy);
    }

    #[test]
    fn test_end_to_end_fit_pan_pinch() {
        let mut vt = ViewportTransform::new();
        vt.reset(2000.0, 1000.0, 500.0).unwrap();
        assert_eq!(vt.scale(), 0.25);

        vt.pan(10.0, -10.0);
        assert_eq!(vt.offset(), (10.0, -10.0));

        vt.pinch_zoom(100.0, 150.0, 250.0, 250.0).unwrap();
        assert!(approx(vt.scale(), 0.375));

        // center - offset = (240, 260), scale / prev_scale - 1 = 0.5
        let (ox, oy) = vt.offset();
        assert!(approx(ox, 10.0 - 240.0 * 0.5));
        assert!(approx(oy, -10.0 - 260.0 * 0.5));
        assert!(approx(ox, -110.0));
        assert!(approx(oy, -140.0));
    }

    #[test]
    fn test_export_space_identity_at_viewport_size() {
        let mut vt = ViewportTransform::new();
        vt.reset(1000.0, 1000.0, 500.0).unwrap();
        vt.pan(12.0, -3.0);

        let t = vt.to_export_space(500.0, 500.0).unwrap();
        assert_eq!(t, vt.transform());
    }

    #[test]
    fn test_export_space_1080() {
        let mut vt = ViewportTransform::new();
        vt.reset(2000.0, 1000.0, 500.0).unwrap();
        vt.pan(10.0, -10.0);

        let t = vt.to_export_space(1080.0, 500.0).unwrap();
        assert!(approx(t.scale, 0.25 * 2.16));
        assert!(approx(t.offset_x, 21.6));
        assert!(approx(t.offset_y, -21.6));
    }

    #[test]
    fn test_export_space_rejects_zero_viewport() {
        let vt = ViewportTransform::new();
        assert!(vt.to_export_space(1080.0, 0.0).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
