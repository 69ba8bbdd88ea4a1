//! Re-encode with decreasing quality until the output fits a size budget.
//!
//! The bitmap is converted once; each attempt opens a new encoder session
//! and overwrites the destination. Huffman optimization is always on since
//! the goal is the smallest file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bitmap::Bitmap;
use crate::convert::convert;
use crate::encode::{encode_to_path, CompressionParameters};
use crate::error::CompressError;

/// Size budget and quality schedule for [`compress_to_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeTarget {
    /// Largest acceptable output, in bytes. The comparison is exact, so a
    /// result a few bytes over a whole-KiB budget does not count as a fit.
    pub target_bytes: u64,
    /// Quality of the first attempt.
    pub start_quality: u8,
    /// Quality decrease between attempts. Must be non-zero.
    pub quality_step: u8,
}

impl Default for SizeTarget {
    fn default() -> Self {
        Self {
            target_bytes: 300 * 1024,
            start_quality: 100,
            quality_step: 10,
        }
    }
}

impl SizeTarget {
    pub fn new(target_bytes: u64) -> Self {
        Self {
            target_bytes,
            ..Default::default()
        }
    }
}

/// Result of a size-constrained compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FitOutcome {
    /// The source was already no larger than the target; nothing was written.
    AlreadyWithinTarget { source_bytes: u64 },
    /// An attempt met the target; its output is at the destination.
    Fit { quality: u8, bytes: u64, attempts: u32 },
    /// No quality met the target; the last (smallest) attempt is kept.
    BestEffort { quality: u8, bytes: u64, attempts: u32 },
}

impl FitOutcome {
    /// Whether the destination holds a JPEG from this call.
    pub fn wrote_output(&self) -> bool {
        !matches!(self, FitOutcome::AlreadyWithinTarget { .. })
    }

    pub fn met_target(&self) -> bool {
        !matches!(self, FitOutcome::BestEffort { .. })
    }
}

/// Compress `bitmap` into `destination`, lowering quality by
/// `target.quality_step` after every attempt that exceeds the budget.
///
/// `source_bytes` is the size of the original encoded image; if it already
/// fits, no attempt is made. The search stops at the first fit or when the
/// attempt at quality 1 misses too. When a step would go below 1, quality 1
/// is tried instead.
///
/// # Errors
///
/// Any failed attempt ends the search with its error.
pub fn compress_to_size(
    bitmap: &Bitmap,
    source_bytes: u64,
    destination: &Path,
    target: &SizeTarget,
) -> Result<FitOutcome, CompressError> {
    if target.quality_step == 0 {
        return Err(CompressError::PreconditionViolation(
            "quality step must be non-zero".to_string(),
        ));
    }

    if source_bytes <= target.target_bytes {
        info!(
            source_bytes,
            target_bytes = target.target_bytes,
            "Source already within target size, skipping"
        );
        return Ok(FitOutcome::AlreadyWithinTarget { source_bytes });
    }

    let planar = convert(&bitmap.lock()?)?;
    let mut quality = target.start_quality.clamp(1, 100);
    let mut attempts = 0;

    loop {
        attempts += 1;
        let params = CompressionParameters::new(bitmap.width, bitmap.height, quality, true);
        let summary = encode_to_path(&planar, params, destination)?;
        debug!(quality, bytes = summary.bytes_written, attempts, "Size search attempt");

        if summary.bytes_written <= target.target_bytes {
            return Ok(FitOutcome::Fit {
                quality,
                bytes: summary.bytes_written,
                attempts,
            });
        }

        match quality.checked_sub(target.quality_step) {
            Some(next) if next >= 1 => quality = next,
            // One last attempt at the floor before giving up
            _ if quality > 1 => quality = 1,
            _ => {
                warn!(
                    quality,
                    bytes = summary.bytes_written,
                    target_bytes = target.target_bytes,
                    "Target size not reached at lowest quality"
                );
                return Ok(FitOutcome::BestEffort {
                    quality,
                    bytes: summary.bytes_written,
                    attempts,
                });
            }
        }
    }
}
