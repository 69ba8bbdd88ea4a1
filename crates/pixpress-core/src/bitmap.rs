//! Owned packed-pixel bitmaps.
//!
//! A [`Bitmap`] stores one `0xAARRGGBB` sample per pixel, the layout the
//! converter reads. [`Bitmap::lock`] hands out the read-only view used for
//! one conversion; the borrow ends when the view is dropped.

use crate::convert::SourcePixelBuffer;
use crate::error::CompressError;

/// Pack an opaque pixel as `0xFFRRGGBB`.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// A bitmap with packed 32-bit pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Packed samples, `width * height` of them.
    pub pixels: Vec<u32>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A bitmap filled with one packed color.
    pub fn filled(width: u32, height: u32, color: u32) -> Self {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// Pack an RGB image, marking every pixel opaque.
    pub fn from_rgb_image(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| pack_argb(p[0], p[1], p[2])).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Borrow the pixels for conversion.
    pub fn lock(&self) -> Result<SourcePixelBuffer<'_>, CompressError> {
        SourcePixelBuffer::new(&self.pixels, self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
