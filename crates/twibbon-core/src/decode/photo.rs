//! Photo decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbaImage};

use super::{DecodeError, Orientation};

/// Decode a photo from encoded bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Encoded image file bytes (JPEG or PNG)
///
/// # Returns
///
/// An RGBA8 image, upright according to its EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data is corrupted or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    Ok(apply_orientation(img, orientation).into_rgba8())
}

/// Decode a photo from encoded bytes without applying EXIF orientation.
///
/// Use this for assets that are already upright, such as overlay frames and
/// placeholders.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<RgbaImage, DecodeError> {
    Ok(decode_dynamic(bytes)?.into_rgba8())
}

/// Extract the EXIF orientation from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if there is no EXIF data or no orientation tag.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba};

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, format).unwrap();
        cursor.into_inner()
    }

    /// 2x1: red | green
    fn two_pixel_strip() -> DynamicImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let mut src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        src.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let bytes = encode(&DynamicImage::ImageRgba8(src.clone()), ImageFormat::Png);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([128, 128, 128])));
        let bytes = encode(&src, ImageFormat::Jpeg);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert!(decoded.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode(&two_pixel_strip(), ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        let bytes = encode(&two_pixel_strip(), ImageFormat::Png);
        assert_eq!(get_orientation(&bytes), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_no_orientation_variant_matches_plain_decode() {
        let bytes = encode(&two_pixel_strip(), ImageFormat::Png);
        assert_eq!(
            decode_image_no_orientation(&bytes).unwrap(),
            decode_image(&bytes).unwrap()
        );
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let result = apply_orientation(two_pixel_strip(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        // Left edge moves to the top
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(two_pixel_strip(), Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_transpose() {
        let result = apply_orientation(two_pixel_strip(), Orientation::Transpose).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(result.get_pixel(0, 1).0, [0, 255, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let result = apply_orientation(two_pixel_strip(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
