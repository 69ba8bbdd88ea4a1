//! Error types shared by the conversion and encoding stages.
//!
//! Every stage returns a [`CompressError`]. Only the boolean call surface
//! ([`crate::compress`]) collapses it to success/failure; the message itself
//! goes to the log.

use std::path::PathBuf;

use thiserror::Error;

use crate::decode::DecodeError;

/// Errors that can occur while turning a packed bitmap into a JPEG file.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The intermediate planar buffer could not be allocated.
    #[error("Failed to allocate {bytes} bytes for the planar color buffer")]
    AllocationFailure { bytes: usize },

    /// The destination could not be opened for writing.
    #[error("Cannot open destination {path:?} for writing: {source}")]
    SinkOpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JPEG encoder failed while configuring, encoding or finishing.
    #[error("JPEG encoder error: {0}")]
    EncoderInternal(String),

    /// Width, height or buffer length supplied by the caller are inconsistent.
    #[error("Invalid input: {0}")]
    PreconditionViolation(String),

    /// The source image file could not be loaded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CompressError {
    /// Short machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            CompressError::AllocationFailure { .. } => "allocation_failure",
            CompressError::SinkOpenFailure { .. } => "sink_open_failure",
            CompressError::EncoderInternal(_) => "encoder_internal",
            CompressError::PreconditionViolation(_) => "precondition_violation",
            CompressError::Decode(_) => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompressError::AllocationFailure { bytes: 12 };
        assert_eq!(
            err.to_string(),
            "Failed to allocate 12 bytes for the planar color buffer"
        );

        let err = CompressError::PreconditionViolation("width must be non-zero".to_string());
        assert_eq!(err.to_string(), "Invalid input: width must be non-zero");
    }

    #[test]
    fn test_sink_open_failure_keeps_source() {
        use std::error::Error as _;

        let err = CompressError::SinkOpenFailure {
            path: PathBuf::from("/missing/out.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(err.kind(), "sink_open_failure");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_decode_error_converts() {
        let err: CompressError = DecodeError::InvalidFormat.into();
        assert_eq!(err.kind(), "decode");
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
