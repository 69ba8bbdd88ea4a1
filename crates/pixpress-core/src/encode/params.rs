//! Compression parameters for one encode.

use serde::{Deserialize, Serialize};

use crate::error::CompressError;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 90;

/// Largest width or height a baseline JPEG frame header can carry.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Clamp a caller-supplied quality to the encoder's `1..=100` range.
pub fn normalize_quality(quality: i32) -> u8 {
    quality.clamp(1, 100) as u8
}

/// Settings for a single encode. Immutable once a session is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionParameters {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Compute image-specific Huffman tables instead of the standard ones.
    pub optimize_entropy_coding: bool,
}

impl Default for CompressionParameters {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            quality: DEFAULT_QUALITY,
            optimize_entropy_coding: true,
        }
    }
}

impl CompressionParameters {
    pub fn new(width: u32, height: u32, quality: u8, optimize_entropy_coding: bool) -> Self {
        Self {
            width,
            height,
            quality,
            optimize_entropy_coding,
        }
    }

    /// Check the dimensions against what a baseline frame can describe.
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.width == 0 || self.height == 0 {
            return Err(CompressError::PreconditionViolation(format!(
                "width ({}) and height ({}) must be non-zero",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(CompressError::PreconditionViolation(format!(
                "{}x{} exceeds the JPEG limit of {MAX_DIMENSION} pixels per side",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Quality as handed to the encoder.
    pub fn effective_quality(&self) -> u8 {
        self.quality.clamp(1, 100)
    }
}
