//! Pixel conversion from packed 32-bit samples to planar 3-byte pixels.
//!
//! The converter is a pure data transform: it reads a [`SourcePixelBuffer`]
//! of `0xAARRGGBB` samples and produces a [`PlanarColorBuffer`] holding blue,
//! green and red bytes for every pixel. Alpha is discarded.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::convert::{convert, SourcePixelBuffer};
//!
//! let samples = vec![0xFFAABBCC_u32; 4];
//! let source = SourcePixelBuffer::new(&samples, 2, 2)?;
//! let planar = convert(&source)?;
//! assert_eq!(&planar.as_bytes()[..3], &[0xCC, 0xBB, 0xAA]);
//! ```

mod planar;
mod types;

pub use planar::{convert, unpack_bgr};
pub use types::{ChannelOrder, PlanarColorBuffer, SourcePixelBuffer, BYTES_PER_PIXEL};
