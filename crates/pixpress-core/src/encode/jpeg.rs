//! JPEG encoding of planar buffers to memory or to a file.
//!
//! Both entry points open a fresh [`EncoderSession`] per call. The file
//! variant closes the destination before returning, whether or not the
//! encode succeeded.

use std::path::Path;

use super::params::CompressionParameters;
use super::session::{EncodeSummary, EncoderSession};
use crate::convert::PlanarColorBuffer;
use crate::error::CompressError;

/// Encode a planar buffer to JPEG bytes.
///
/// # Arguments
///
/// * `buffer` - Planar pixels (3 bytes per pixel, row-major, any [`ChannelOrder`])
/// * `quality` - JPEG quality (clamped to 1-100)
/// * `optimize_entropy_coding` - Compute Huffman tables for this image
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
///
/// [`ChannelOrder`]: crate::convert::ChannelOrder
pub fn encode_jpeg(
    buffer: &PlanarColorBuffer,
    quality: u8,
    optimize_entropy_coding: bool,
) -> Result<Vec<u8>, CompressError> {
    let params = CompressionParameters::new(
        buffer.width(),
        buffer.height(),
        quality,
        optimize_entropy_coding,
    );
    let mut session = EncoderSession::new(Vec::new(), params)?;
    session.encode(buffer)?;
    Ok(session.into_sink())
}

/// Encode a planar buffer into the file at `path`, creating or truncating it.
///
/// If encoding fails after the file was opened, the file is closed and left
/// in place with whatever was written; it must not be treated as a JPEG.
pub fn encode_to_path(
    buffer: &PlanarColorBuffer,
    params: CompressionParameters,
    path: &Path,
) -> Result<EncodeSummary, CompressError> {
    let mut session = EncoderSession::create(path, params)?;
    let summary = session.encode(buffer)?;
    // Dropping the writer closes the file.
    drop(session.into_sink());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ChannelOrder;

    fn gray(width: usize, height: usize) -> PlanarColorBuffer {
        let pixels = vec![128u8; width * height * 3];
        PlanarColorBuffer::from_raw(width as u32, height as u32, ChannelOrder::Bgr, pixels)
            .unwrap()
    }

    fn gradient(width: u32, height: u32) -> PlanarColorBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(128u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push((x * 255 / width) as u8);
            }
        }
        PlanarColorBuffer::from_raw(width, height, ChannelOrder::Bgr, pixels).unwrap()
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let jpeg_bytes = encode_jpeg(&gray(100, 100), 90, false).unwrap();

        // SOI marker
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        // EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let image = gradient(100, 100);

        let low_q = encode_jpeg(&image, 20, false).unwrap();
        let high_q = encode_jpeg(&image, 95, false).unwrap();

        assert!(high_q.len() > low_q.len());
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let image = gray(10, 10);

        // Quality 0 is treated as 1
        assert_eq!(
            encode_jpeg(&image, 0, false).unwrap(),
            encode_jpeg(&image, 1, false).unwrap()
        );

        // Quality 255 is treated as 100
        assert_eq!(
            encode_jpeg(&image, 255, false).unwrap(),
            encode_jpeg(&image, 100, false).unwrap()
        );
    }

    #[test]
    fn test_encode_jpeg_small_image() {
        // 1x1 red pixel in BGR order
        let image = PlanarColorBuffer::from_raw(1, 1, ChannelOrder::Bgr, vec![0, 0, 255]).unwrap();

        let jpeg_bytes = encode_jpeg(&image, 90, true).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_non_square() {
        assert!(encode_jpeg(&gray(200, 50), 90, false).is_ok());
        assert!(encode_jpeg(&gray(50, 200), 90, false).is_ok());
    }

    #[test]
    fn test_encode_jpeg_gradient_size() {
        let jpeg_bytes = encode_jpeg(&gradient(100, 100), 90, false).unwrap();

        assert!(jpeg_bytes.len() > 500);
        assert!(jpeg_bytes.len() < 50000);
    }

    #[test]
    fn test_encode_jpeg_optimized_not_larger() {
        let image = gradient(120, 80);

        let standard = encode_jpeg(&image, 75, false).unwrap();
        let optimized = encode_jpeg(&image, 75, true).unwrap();

        assert!(optimized.len() <= standard.len());
    }

    #[test]
    fn test_encode_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.jpg");
        let image = gray(20, 10);
        let params = CompressionParameters::new(20, 10, 85, true);

        let summary = encode_to_path(&image, params, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len() as u64, summary.bytes_written);
        assert_eq!(written, encode_jpeg(&image, 85, true).unwrap());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
