//! Pixpress Core - packed bitmap to JPEG compression
//!
//! This crate converts bitmaps held as packed `0xAARRGGBB` samples into
//! baseline JPEG files. The pipeline has two stages:
//!
//! 1. [`convert`] turns the packed samples into a 3-byte-per-pixel planar
//!    buffer (blue, green, red).
//! 2. [`encode`] drives a one-shot encoder session that feeds that buffer
//!    scanline by scanline and writes the stream to the destination.
//!
//! [`compress`] is the single boolean call surface. The `Result`-returning
//! functions ([`try_compress`], [`compress_file`], [`compress_file_to_size`])
//! expose the failure class for callers that want it.

use std::path::Path;

use tracing::error;

pub mod bitmap;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod error;
pub mod target_size;

pub use bitmap::{pack_argb, Bitmap};
pub use convert::{ChannelOrder, PlanarColorBuffer, SourcePixelBuffer};
pub use decode::{load_bitmap, LoadOptions};
pub use encode::{normalize_quality, CompressionParameters, EncodeSummary, EncoderSession};
pub use error::CompressError;
pub use target_size::{compress_to_size, FitOutcome, SizeTarget};

/// Compress packed pixels into a JPEG file, reporting only success.
///
/// `pixels` holds at least `width * height` samples in row-major order.
/// `quality` is clamped to 1-100. On failure the reason is logged and the
/// destination, if it was created, holds no valid image.
pub fn compress(
    pixels: &[u32],
    width: u32,
    height: u32,
    destination: &Path,
    quality: i32,
    optimize_entropy_coding: bool,
) -> bool {
    match try_compress(
        pixels,
        width,
        height,
        destination,
        quality,
        optimize_entropy_coding,
    ) {
        Ok(_) => true,
        Err(err) => {
            error!(
                kind = err.kind(),
                error = %err,
                destination = %destination.display(),
                "Compression failed"
            );
            false
        }
    }
}

/// [`compress`] with the failure reason kept.
pub fn try_compress(
    pixels: &[u32],
    width: u32,
    height: u32,
    destination: &Path,
    quality: i32,
    optimize_entropy_coding: bool,
) -> Result<EncodeSummary, CompressError> {
    let source = SourcePixelBuffer::new(pixels, width, height)?;
    compress_pixels(
        &source,
        destination,
        normalize_quality(quality),
        optimize_entropy_coding,
    )
}

/// Convert `source` and encode it into `destination`.
pub fn compress_pixels(
    source: &SourcePixelBuffer<'_>,
    destination: &Path,
    quality: u8,
    optimize_entropy_coding: bool,
) -> Result<EncodeSummary, CompressError> {
    let params = CompressionParameters::new(
        source.width(),
        source.height(),
        quality,
        optimize_entropy_coding,
    );
    params.validate()?;

    let planar = convert::convert(source)?;
    encode::encode_to_path(&planar, params, destination)
}

/// Load an image file, fit it to the display bounds in `options`, and
/// compress it.
pub fn compress_file(
    input: &Path,
    output: &Path,
    quality: i32,
    optimize_entropy_coding: bool,
    options: &LoadOptions,
) -> Result<EncodeSummary, CompressError> {
    let bitmap = load_bitmap(input, options)?;
    compress_pixels(
        &bitmap.lock()?,
        output,
        normalize_quality(quality),
        optimize_entropy_coding,
    )
}

/// Load an image file and compress it so the output fits `target`.
///
/// When the input file is already within the target nothing is decoded or
/// written.
pub fn compress_file_to_size(
    input: &Path,
    output: &Path,
    target: &SizeTarget,
    options: &LoadOptions,
) -> Result<FitOutcome, CompressError> {
    let source_bytes = std::fs::metadata(input)
        .map_err(|e| decode::DecodeError::IoError(format!("{}: {e}", input.display())))?
        .len();
    if source_bytes <= target.target_bytes {
        return Ok(FitOutcome::AlreadyWithinTarget { source_bytes });
    }

    let bitmap = load_bitmap(input, options)?;
    compress_to_size(&bitmap, source_bytes, output, target)
}
