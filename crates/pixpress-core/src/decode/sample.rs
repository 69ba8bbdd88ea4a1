//! Integer downsampling so loaded images fit display bounds.

use image::DynamicImage;

use super::FilterType;

/// Shrink factor for an image of `width x height`.
///
/// Landscape images are bounded by `max_width`, portrait images by
/// `max_height`; square images are left alone. Only one edge is considered
/// since the aspect ratio is preserved. The integer ratio is rounded down to
/// a power of two, and is never below 1.
pub fn sample_ratio(width: u32, height: u32, max_width: u32, max_height: u32) -> u32 {
    let ratio = if width > height && max_width > 0 && width > max_width {
        width / max_width
    } else if width < height && max_height > 0 && height > max_height {
        height / max_height
    } else {
        1
    };
    match ratio {
        0 => 1,
        r => 1 << r.ilog2(),
    }
}

/// Shrink `img` by `ratio` on both axes. A ratio of 1 returns it unchanged.
pub fn downsample(img: DynamicImage, ratio: u32, filter: FilterType) -> DynamicImage {
    if ratio <= 1 {
        return img;
    }
    let width = (img.width() / ratio).max(1);
    let height = (img.height() / ratio).max(1);
    img.resize_exact(width, height, filter.to_image_filter())
}
