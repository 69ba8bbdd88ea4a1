//! JPEG encoding of planar color buffers.
//!
//! This module provides functionality for:
//! - Configuring a one-shot [`EncoderSession`] (quality, Huffman optimization)
//! - Feeding the encoder one scanline at a time from a [`PlanarColorBuffer`]
//! - Writing the stream to memory or to a file with guaranteed cleanup
//!
//! # Architecture
//!
//! Every encode owns its encoder and its sink for the duration of one call.
//! Nothing is shared between calls, so independent encodes may run on
//! different threads. Output is always baseline JPEG.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::encode::encode_jpeg;
//!
//! let jpeg_bytes = encode_jpeg(&planar, 90, true)?;
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```
//!
//! [`PlanarColorBuffer`]: crate::convert::PlanarColorBuffer

mod jpeg;
mod params;
mod scanline;
mod session;

pub use jpeg::{encode_jpeg, encode_to_path};
pub use params::{normalize_quality, CompressionParameters, DEFAULT_QUALITY, MAX_DIMENSION};
pub use session::{EncodeSummary, EncoderSession, SessionState};
