//! Feeds a planar buffer to the encoder one scanline at a time.

use std::cell::Cell;

use jpeg_encoder::{rgb_to_ycbcr, JpegColorType};

use crate::convert::PlanarColorBuffer;

/// Hands the encoder row `y` of a [`PlanarColorBuffer`] on request.
///
/// Pixels are read in the buffer's declared [`ChannelOrder`], so a BGR
/// buffer is never mistaken for RGB. `next_scanline` records one past the
/// highest row handed out.
///
/// [`ChannelOrder`]: crate::convert::ChannelOrder
pub(crate) struct ScanlineFeeder<'a> {
    buffer: &'a PlanarColorBuffer,
    next_scanline: &'a Cell<u32>,
}

impl<'a> ScanlineFeeder<'a> {
    /// Caller guarantees both dimensions fit in `u16`.
    pub(crate) fn new(buffer: &'a PlanarColorBuffer, next_scanline: &'a Cell<u32>) -> Self {
        Self {
            buffer,
            next_scanline,
        }
    }
}

impl jpeg_encoder::ImageBuffer for ScanlineFeeder<'_> {
    fn get_jpeg_color_type(&self) -> JpegColorType {
        JpegColorType::Ycbcr
    }

    fn width(&self) -> u16 {
        self.buffer.width() as u16
    }

    fn height(&self) -> u16 {
        self.buffer.height() as u16
    }

    fn fill_buffers(&self, y: u16, buffers: &mut [Vec<u8>; 4]) {
        // The encoder pads partial MCU rows by repeating the last scanline.
        let y = u32::from(y).min(self.buffer.height() - 1);
        let order = self.buffer.channel_order();

        for pixel in self.buffer.row(y).chunks_exact(3) {
            let (r, g, b) = order.to_rgb(pixel);
            let (luma, cb, cr) = rgb_to_ycbcr(r, g, b);
            buffers[0].push(luma);
            buffers[1].push(cb);
            buffers[2].push(cr);
        }

        if y + 1 > self.next_scanline.get() {
            self.next_scanline.set(y + 1);
        }
    }
}
