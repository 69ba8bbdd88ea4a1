//! Source image loading with downsampling and EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::sample::{downsample, sample_ratio};
use super::{DecodeError, LoadOptions, Orientation};
use crate::bitmap::Bitmap;

/// Read and decode the image file at `path` into a packed bitmap.
///
/// # Errors
///
/// Returns `DecodeError::IoError` if the file cannot be read and
/// `DecodeError::CorruptedFile` if it cannot be decoded.
pub fn load_bitmap(path: &Path, options: &LoadOptions) -> Result<Bitmap, DecodeError> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {e}", path.display())))?;
    decode_bitmap(&bytes, options)
}

/// Decode image bytes into a packed bitmap.
///
/// The image is first shrunk by the integer ratio from [`sample_ratio`],
/// then rotated/flipped per its EXIF orientation when
/// `options.apply_orientation` is set. Alpha is dropped; every output pixel
/// is opaque.
pub fn decode_bitmap(bytes: &[u8], options: &LoadOptions) -> Result<Bitmap, DecodeError> {
    let orientation = if options.apply_orientation {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let ratio = sample_ratio(img.width(), img.height(), options.max_width, options.max_height);
    debug!(
        width = img.width(),
        height = img.height(),
        ratio,
        ?orientation,
        "Decoded source image"
    );

    let img = downsample(img, ratio, options.filter);
    let img = apply_orientation(img, orientation);

    Ok(Bitmap::from_rgb_image(&img.into_rgb8()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(img: image::RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn two_by_one() -> DynamicImage {
        let pixels = vec![
            255, 0, 0, // Red (left)
            0, 255, 0, // Green (right)
        ];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let bytes = png_bytes(two_by_one().into_rgb8());
        let bitmap = decode_bitmap(&bytes, &LoadOptions::default()).unwrap();

        assert_eq!(bitmap.width, 2);
        assert_eq!(bitmap.height, 1);
        assert_eq!(bitmap.pixels, vec![0xFFFF0000, 0xFF00FF00]);
    }

    #[test]
    fn test_decode_downsamples_large_image() {
        let bytes = png_bytes(image::RgbImage::new(400, 100));
        let options = LoadOptions {
            max_width: 100,
            ..Default::default()
        };

        let bitmap = decode_bitmap(&bytes, &options).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (100, 25));
        assert_eq!(bitmap.pixel_count(), 2500);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_bitmap(&[0x00, 0x01, 0x02, 0x03], &LoadOptions::default());
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(image::RgbImage::new(8, 8));
        let result = decode_bitmap(&bytes[..bytes.len() / 2], &LoadOptions::default());
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_bitmap(&dir.path().join("nope.png"), &LoadOptions::default());
        assert!(matches!(result, Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rotated = apply_orientation(two_by_one(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rotated.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let rotated = apply_orientation(two_by_one(), Orientation::Rotate180).into_rgb8();

        assert_eq!(rotated.dimensions(), (2, 1));
        assert_eq!(rotated.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(rotated.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let flipped = apply_orientation(two_by_one(), Orientation::FlipHorizontal).into_rgb8();

        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
