//! Buffer types on either side of the pixel converter.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// Bytes per pixel in a planar color buffer.
pub const BYTES_PER_PIXEL: usize = 3;

/// Byte order of the three channels of one pixel in a [`PlanarColorBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Blue, green, red. What [`convert`](super::convert) produces.
    #[default]
    Bgr,
    /// Red, green, blue.
    Rgb,
}

impl ChannelOrder {
    /// Read one 3-byte pixel as `(red, green, blue)`.
    #[inline]
    pub fn to_rgb(self, pixel: &[u8]) -> (u8, u8, u8) {
        match self {
            ChannelOrder::Bgr => (pixel[2], pixel[1], pixel[0]),
            ChannelOrder::Rgb => (pixel[0], pixel[1], pixel[2]),
        }
    }
}

/// Compute `width * height * 3`, rejecting zero or overflowing dimensions.
pub(crate) fn planar_len(width: u32, height: u32) -> Result<usize, CompressError> {
    if width == 0 || height == 0 {
        return Err(CompressError::PreconditionViolation(format!(
            "width ({width}) and height ({height}) must be non-zero"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            CompressError::PreconditionViolation(format!(
                "{width}x{height} image does not fit in memory"
            ))
        })
}

/// Read-only view over packed 32-bit color samples.
///
/// Each sample stores alpha in bits 24-31 (ignored), red in bits 16-23,
/// green in bits 8-15 and blue in bits 0-7. Rows may be padded: `stride` is
/// the distance between row starts, counted in samples.
#[derive(Debug, Clone)]
pub struct SourcePixelBuffer<'a> {
    samples: Cow<'a, [u32]>,
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> SourcePixelBuffer<'a> {
    /// Borrow a tightly packed buffer of at least `width * height` samples.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::PreconditionViolation` if either dimension is
    /// zero or the buffer is too short.
    pub fn new(samples: &'a [u32], width: u32, height: u32) -> Result<Self, CompressError> {
        Self::with_stride(samples, width, height, width as usize)
    }

    /// Borrow a buffer whose rows start `stride` samples apart.
    pub fn with_stride(
        samples: &'a [u32],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, CompressError> {
        Self::validated(Cow::Borrowed(samples), width, height, stride)
    }

    /// Build a buffer from raw locked bitmap bytes, four bytes per sample in
    /// native byte order.
    pub fn from_ne_bytes(
        bytes: &[u8],
        width: u32,
        height: u32,
    ) -> Result<SourcePixelBuffer<'static>, CompressError> {
        if bytes.len() % 4 != 0 {
            return Err(CompressError::PreconditionViolation(format!(
                "pixel byte buffer length {} is not a multiple of 4",
                bytes.len()
            )));
        }
        let samples: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        SourcePixelBuffer::validated(Cow::Owned(samples), width, height, width as usize)
    }

    fn validated(
        samples: Cow<'a, [u32]>,
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, CompressError> {
        planar_len(width, height)?;

        if stride < width as usize {
            return Err(CompressError::PreconditionViolation(format!(
                "row stride {stride} is smaller than width {width}"
            )));
        }

        // The last row only needs `width` samples, not a full stride.
        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|n| n.checked_add(width as usize))
            .ok_or_else(|| {
                CompressError::PreconditionViolation("pixel buffer size overflows".to_string())
            })?;
        if samples.len() < required {
            return Err(CompressError::PreconditionViolation(format!(
                "pixel buffer holds {} samples, {width}x{height} needs {required}",
                samples.len()
            )));
        }

        Ok(Self {
            samples,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between row starts, in samples.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.stride;
        &self.samples[start..start + self.width as usize]
    }
}

/// Owned, row-major buffer holding 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanarColorBuffer {
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PlanarColorBuffer {
    /// Wrap an existing byte buffer of exactly `width * height * 3` bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self, CompressError> {
        let expected = planar_len(width, height)?;
        if data.len() != expected {
            return Err(CompressError::PreconditionViolation(format!(
                "expected {expected} bytes (width * height * 3), got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height * 3`.
    pub(crate) fn from_parts(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * BYTES_PER_PIXEL,
            "Planar buffer size mismatch"
        );
        Self {
            width,
            height,
            order,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Bytes per row (`width * 3`).
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Scanline `y`, starting at byte offset `y * stride`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_order_to_rgb() {
        let px = [1u8, 2, 3];
        assert_eq!(ChannelOrder::Bgr.to_rgb(&px), (3, 2, 1));
        assert_eq!(ChannelOrder::Rgb.to_rgb(&px), (1, 2, 3));
    }

    #[test]
    fn test_source_rejects_zero_dimensions() {
        let samples = [0u32; 4];
        assert!(matches!(
            SourcePixelBuffer::new(&samples, 0, 2),
            Err(CompressError::PreconditionViolation(_))
        ));
        assert!(matches!(
            SourcePixelBuffer::new(&samples, 2, 0),
            Err(CompressError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_source_rejects_short_buffer() {
        let samples = [0u32; 5];
        let result = SourcePixelBuffer::new(&samples, 3, 2);
        assert!(matches!(result, Err(CompressError::PreconditionViolation(_))));
    }

    #[test]
    fn test_source_accepts_longer_buffer() {
        let samples = [0u32; 10];
        let source = SourcePixelBuffer::new(&samples, 3, 2).unwrap();
        assert_eq!(source.row(1).len(), 3);
    }

    #[test]
    fn test_source_stride() {
        // 2x2 image padded to 3 samples per row; last row unpadded
        let samples = [1u32, 2, 0, 3, 4];
        let source = SourcePixelBuffer::with_stride(&samples, 2, 2, 3).unwrap();
        assert_eq!(source.row(0), &[1, 2]);
        assert_eq!(source.row(1), &[3, 4]);

        assert!(SourcePixelBuffer::with_stride(&samples, 2, 2, 1).is_err());
    }

    #[test]
    fn test_source_from_ne_bytes() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0xFFAABBCCu32.to_ne_bytes());
        bytes.extend_from_slice(&0xFF112233u32.to_ne_bytes());

        let source = SourcePixelBuffer::from_ne_bytes(&bytes, 2, 1).unwrap();
        assert_eq!(source.row(0), &[0xFFAABBCC, 0xFF112233]);

        assert!(SourcePixelBuffer::from_ne_bytes(&bytes[..7], 1, 1).is_err());
    }

    #[test]
    fn test_planar_from_raw_length_check() {
        assert!(PlanarColorBuffer::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 12]).is_ok());
        assert!(PlanarColorBuffer::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 11]).is_err());
        assert!(PlanarColorBuffer::from_raw(0, 2, ChannelOrder::Rgb, vec![]).is_err());
    }

    #[test]
    fn test_planar_rows() {
        let data: Vec<u8> = (0..18).collect();
        let buf = PlanarColorBuffer::from_raw(3, 2, ChannelOrder::Bgr, data).unwrap();
        assert_eq!(buf.stride(), 9);
        assert_eq!(buf.row(0), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buf.row(1)[0], 9);
        assert_eq!(buf.len(), 18);
    }

    #[test]
    fn test_planar_len_overflow() {
        assert!(planar_len(u32::MAX, u32::MAX).is_err());
        assert!(planar_len(1, 0).is_err());
        assert_eq!(planar_len(4, 5).unwrap(), 60);
    }
}
