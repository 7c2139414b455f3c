//! Baseline JPEG encoding of rendered pages.
//!
//! PDF readers decode `DCTDecode` streams natively, so a page image can be
//! embedded as the exact bytes produced here.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;

/// Encode packed RGB8 pixels as JPEG.
///
/// `quality` is clamped to 1..=100.
///
/// # Errors
///
/// - `EncodeError::InvalidDimensions` if either side is zero
/// - `EncodeError::InvalidPixelData` if `pixels` is not `width * height * 3` bytes
/// - `EncodeError::EncodingFailed` if the encoder itself fails
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::with_capacity(expected / 8));
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gradient_image;

    const SOI: [u8; 2] = [0xFF, 0xD8];
    const EOI: [u8; 2] = [0xFF, 0xD9];

    #[test]
    fn test_output_is_framed_jpeg() {
        let img = gradient_image(64, 48);
        let jpeg = encode_jpeg(&img.pixels, 64, 48, 90).unwrap();

        assert_eq!(jpeg[..2], SOI);
        assert_eq!(jpeg[jpeg.len() - 2..], EOI);
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_out_of_range_quality_is_accepted() {
        let img = gradient_image(8, 8);
        assert!(encode_jpeg(&img.pixels, 8, 8, 0).is_ok());
        assert!(encode_jpeg(&img.pixels, 8, 8, u8::MAX).is_ok());
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let img = gradient_image(96, 96);
        let low = encode_jpeg(&img.pixels, 96, 96, 10).unwrap();
        let high = encode_jpeg(&img.pixels, 96, 96, 100).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_buffer_length_mismatch() {
        let pixels = vec![0u8; 10 * 9 * 3];
        assert_eq!(
            encode_jpeg(&pixels, 10, 10, 90),
            Err(EncodeError::InvalidPixelData {
                expected: 300,
                actual: 270
            })
        );
    }

    #[test]
    fn test_zero_sized_image() {
        assert_eq!(
            encode_jpeg(&[], 0, 7, 90),
            Err(EncodeError::InvalidDimensions { width: 0, height: 7 })
        );
        assert_eq!(
            encode_jpeg(&[], 7, 0, 90),
            Err(EncodeError::InvalidDimensions { width: 7, height: 0 })
        );
    }

    #[test]
    fn test_single_pixel() {
        let jpeg = encode_jpeg(&[255, 0, 0], 1, 1, 90).unwrap();
        assert_eq!(jpeg[..2], SOI);
    }
}
