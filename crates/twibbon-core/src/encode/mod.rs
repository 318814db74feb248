//! Image encoding for export.
//!
//! Exports are PNG so the transparent corners of a frame survive when the
//! photo does not cover the whole canvas.
//!
//! # Examples
//!
//! ```ignore
//! use twibbon_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray, half transparent
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, encode_png_image, EncodeError};
