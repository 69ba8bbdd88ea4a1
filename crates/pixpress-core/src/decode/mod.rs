//! Source image loading for the file-based compression paths.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG files into packed [`Bitmap`]s
//! - Shrinking large images by an integer ratio to fit display bounds
//! - Applying EXIF orientation so the output is upright
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::{load_bitmap, LoadOptions};
//!
//! let bitmap = load_bitmap(Path::new("photo.jpg"), &LoadOptions::default())?;
//! println!("Loaded {}x{} bitmap", bitmap.width, bitmap.height);
//! ```
//!
//! [`Bitmap`]: crate::bitmap::Bitmap

mod image_file;
mod sample;
mod types;

pub use image_file::{decode_bitmap, extract_orientation, load_bitmap};
pub use sample::{downsample, sample_ratio};
pub use types::{
    DecodeError, FilterType, LoadOptions, Orientation, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH,
};
