//! Photo decoding for the editor.
//!
//! Uploaded photos arrive as encoded bytes (usually JPEG straight from a phone
//! camera, sometimes PNG). They are decoded with the `image` crate, rotated
//! according to their EXIF orientation so they appear the way the camera app
//! showed them, and converted to RGBA8 for compositing.
//!
//! # Examples
//!
//! ```ignore
//! use twibbon_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let photo = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} photo", photo.width(), photo.height());
//! ```

mod photo;
mod types;

pub use photo::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation};
