//! Pixel sampling for scaled image draws.
//!
//! Draws use inverse mapping: for each destination pixel we compute the
//! source position it covers and sample there. Coordinates are continuous,
//! with pixel `(i, j)` covering `[i, i+1) x [j, j+1)` and its center at
//! `(i + 0.5, j + 0.5)`. Positions past the edge clamp to the border pixel.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Interpolation filter for scaled draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbor (fastest, blocky when magnified).
    Nearest,
    /// Bilinear on premultiplied alpha (smooth, no dark fringes).
    #[default]
    Bilinear,
}

/// Sample `image` at continuous position `(x, y)`.
pub fn sample(image: &RgbaImage, x: f64, y: f64, filter: InterpolationFilter) -> Rgba<u8> {
    match filter {
        InterpolationFilter::Nearest => sample_nearest(image, x, y),
        InterpolationFilter::Bilinear => sample_bilinear(image, x, y),
    }
}

#[inline]
fn clamp_index(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

fn sample_nearest(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let px = clamp_index(x.floor() as i64, image.width());
    let py = clamp_index(y.floor() as i64, image.height());
    *image.get_pixel(px, py)
}

/// Premultiplied RGBA as floats.
#[inline]
fn premultiplied(p: &Rgba<u8>) -> [f64; 4] {
    let a = p[3] as f64 / 255.0;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, p[3] as f64]
}

fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    // Shift so that integer positions land on pixel centers
    let sx = x - 0.5;
    let sy = y - 0.5;

    let fx0 = sx.floor();
    let fy0 = sy.floor();
    let fx = sx - fx0;
    let fy = sy - fy0;

    let x0 = clamp_index(fx0 as i64, image.width());
    let x1 = clamp_index(fx0 as i64 + 1, image.width());
    let y0 = clamp_index(fy0 as i64, image.height());
    let y1 = clamp_index(fy0 as i64 + 1, image.height());

    let p00 = premultiplied(image.get_pixel(x0, y0));
    let p10 = premultiplied(image.get_pixel(x1, y0));
    let p01 = premultiplied(image.get_pixel(x0, y1));
    let p11 = premultiplied(image.get_pixel(x1, y1));

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let unpremultiply = 255.0 / alpha;
    Rgba([
        (acc[0] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[1] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[2] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbaImage {
        // 2x1: opaque red | opaque blue
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        img
    }

    #[test]
    fn test_nearest_picks_covering_pixel() {
        let img = checker();
        assert_eq!(
            sample(&img, 0.2, 0.5, InterpolationFilter::Nearest),
            Rgba([255, 0, 0, 255])
        );
        assert_eq!(
            sample(&img, 1.9, 0.5, InterpolationFilter::Nearest),
            Rgba([0, 0, 255, 255])
        );
    }

    #[test]
    fn test_clamps_outside_edges() {
        let img = checker();
        for filter in [InterpolationFilter::Nearest, InterpolationFilter::Bilinear] {
            assert_eq!(sample(&img, -5.0, 0.5, filter), Rgba([255, 0, 0, 255]));
            assert_eq!(sample(&img, 9.0, 3.0, filter), Rgba([0, 0, 255, 255]));
        }
    }

    #[test]
    fn test_bilinear_at_centers_is_exact() {
        let img = checker();
        assert_eq!(
            sample(&img, 0.5, 0.5, InterpolationFilter::Bilinear),
            Rgba([255, 0, 0, 255])
        );
        assert_eq!(
            sample(&img, 1.5, 0.5, InterpolationFilter::Bilinear),
            Rgba([0, 0, 255, 255])
        );
    }

    #[test]
    fn test_bilinear_midpoint_blends() {
        let img = checker();
        let p = sample(&img, 1.0, 0.5, InterpolationFilter::Bilinear);
        assert_eq!(p, Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn test_bilinear_ignores_color_of_transparent_neighbor() {
        // Opaque white next to fully transparent black
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let p = sample(&img, 1.0, 0.5, InterpolationFilter::Bilinear);
        assert_eq!(&p.0[..3], &[255, 255, 255]);
        assert_eq!(p[3], 128);
    }

    #[test]
    fn test_bilinear_fully_transparent() {
        let img = RgbaImage::new(3, 3);
        assert_eq!(
            sample(&img, 1.3, 1.7, InterpolationFilter::Bilinear),
            Rgba([0, 0, 0, 0])
        );
    }
}
