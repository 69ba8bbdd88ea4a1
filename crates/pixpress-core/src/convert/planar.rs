//! Packed 32-bit samples to 3-byte planar pixels.

use super::types::{planar_len, ChannelOrder, PlanarColorBuffer, SourcePixelBuffer};
use crate::error::CompressError;

/// Split a packed sample into `[blue, green, red]`. Alpha is dropped.
#[inline]
pub fn unpack_bgr(color: u32) -> [u8; 3] {
    let r = ((color & 0x00FF_0000) >> 16) as u8;
    let g = ((color & 0x0000_FF00) >> 8) as u8;
    let b = (color & 0x0000_00FF) as u8;
    [b, g, r]
}

/// Convert packed samples into a row-major BGR planar buffer.
///
/// Rows are walked top to bottom and each row left to right; every sample
/// becomes three bytes in blue, green, red order. The result is always
/// `width * height * 3` bytes and is tagged [`ChannelOrder::Bgr`].
///
/// # Errors
///
/// Returns `CompressError::AllocationFailure` if the output buffer cannot be
/// reserved. Dimension checks already happened when `source` was built.
pub fn convert(source: &SourcePixelBuffer<'_>) -> Result<PlanarColorBuffer, CompressError> {
    let (width, height) = (source.width(), source.height());
    let len = planar_len(width, height)?;

    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| CompressError::AllocationFailure { bytes: len })?;

    for y in 0..height {
        for &color in source.row(y) {
            data.extend_from_slice(&unpack_bgr(color));
        }
    }

    Ok(PlanarColorBuffer::from_parts(
        width,
        height,
        ChannelOrder::Bgr,
        data,
    ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = (u32, u32, Vec<u32>)> {
        (1u32..=40, 1u32..=40).prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            (Just(w), Just(h), prop::collection::vec(any::<u32>(), n..=n))
        })
    }

    proptest! {
        /// Property: output is exactly width * height * 3 bytes.
        #[test]
        fn prop_output_length((width, height, samples) in image_strategy()) {
            let source = SourcePixelBuffer::new(&samples, width, height).unwrap();
            let planar = convert(&source).unwrap();

            prop_assert_eq!(planar.len(), (width * height * 3) as usize);
            prop_assert_eq!(planar.width(), width);
            prop_assert_eq!(planar.height(), height);
        }

        /// Property: every slot holds the sample's blue, green, red bytes.
        #[test]
        fn prop_channel_layout((width, height, samples) in image_strategy()) {
            let source = SourcePixelBuffer::new(&samples, width, height).unwrap();
            let planar = convert(&source).unwrap();

            for (i, &color) in samples.iter().enumerate() {
                let slot = &planar.as_bytes()[i * 3..i * 3 + 3];
                prop_assert_eq!(slot[0], (color & 0xFF) as u8);
                prop_assert_eq!(slot[1], ((color >> 8) & 0xFF) as u8);
                prop_assert_eq!(slot[2], ((color >> 16) & 0xFF) as u8);
            }
        }
    }
}
