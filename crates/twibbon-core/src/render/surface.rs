//! Raster surfaces: the drawing contract and a CPU implementation.

use image::{Rgba, RgbaImage};

use super::sample::{sample, InterpolationFilter};

/// Something a surface can draw that knows its own pixel size.
pub trait ImageSource {
    /// Native `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);
}

impl ImageSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }
}

/// A 2D drawing surface.
///
/// This is the only contract the renderer relies on. Lifecycle of the surface
/// (creation, presentation, serialization) belongs to the caller.
pub trait RasterSurface {
    /// Image type this surface can draw.
    type Source: ImageSource + ?Sized;

    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Clear every pixel to transparent.
    fn clear(&mut self);

    /// Draw `source` scaled into the rectangle `(x, y, width, height)`.
    ///
    /// The rectangle may extend past the surface edges or lie fully outside.
    fn draw_image(&mut self, source: &Self::Source, x: f64, y: f64, width: f64, height: f64);

    /// Run `draw` with the global alpha multiplied by `alpha`, then restore it.
    fn with_alpha<F>(&mut self, alpha: f32, draw: F)
    where
        F: FnOnce(&mut Self),
        Self: Sized;
}

/// CPU surface backed by an RGBA8 buffer.
///
/// Draws use source-over blending scaled by the current global alpha.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    canvas: RgbaImage,
    alpha: f32,
    filter: InterpolationFilter,
}

impl PixelSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            alpha: 1.0,
            filter: InterpolationFilter::default(),
        }
    }

    /// Use `filter` for scaled draws.
    pub fn with_filter(mut self, filter: InterpolationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Current global alpha.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Borrow the underlying buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Take the underlying buffer.
    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    /// Raw RGBA bytes, row-major (4 bytes per pixel).
    pub fn as_raw(&self) -> &[u8] {
        self.canvas.as_raw()
    }
}

impl RasterSurface for PixelSurface {
    type Source = RgbaImage;

    fn size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn clear(&mut self) {
        for p in self.canvas.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    fn draw_image(&mut self, source: &RgbaImage, x: f64, y: f64, width: f64, height: f64) {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 || self.alpha <= 0.0 {
            return;
        }
        if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }

        let (dst_w, dst_h) = self.canvas.dimensions();

        // Destination pixels whose centers fall inside the rectangle
        let col_start = (x - 0.5).ceil().max(0.0);
        let col_end = (x + width - 0.5).ceil().min(dst_w as f64);
        let row_start = (y - 0.5).ceil().max(0.0);
        let row_end = (y + height - 0.5).ceil().min(dst_h as f64);
        if col_start >= col_end || row_start >= row_end {
            return;
        }

        let scale_x = src_w as f64 / width;
        let scale_y = src_h as f64 / height;

        for dy in row_start as u32..row_end as u32 {
            let src_y = (dy as f64 + 0.5 - y) * scale_y;
            for dx in col_start as u32..col_end as u32 {
                let src_x = (dx as f64 + 0.5 - x) * scale_x;

                let px = sample(source, src_x, src_y, self.filter);
                blend_over(self.canvas.get_pixel_mut(dx, dy), px, self.alpha);
            }
        }
    }

    fn with_alpha<F>(&mut self, alpha: f32, draw: F)
    where
        F: FnOnce(&mut Self),
    {
        let previous = self.alpha;
        let alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        self.alpha = previous * alpha;
        draw(self);
        self.alpha = previous;
    }
}

/// Source-over composite of `src` (scaled by `alpha`) onto `dst`.
#[inline]
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, alpha: f32) {
    let src_a = src[3] as f32 / 255.0 * alpha;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for i in 0..3 {
        let c = (src[i] as f32 * src_a + dst[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}
