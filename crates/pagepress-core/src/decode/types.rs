//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes do not start with any known image signature.
    #[error("Invalid or unrecognized image format")]
    InvalidFormat,

    /// The image format is recognized but not accepted for upload.
    #[error("Unsupported image format: {0} (expected JPEG or PNG)")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to zero width or height.
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Upload formats accepted by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Map a sniffed `image` crate format to an accepted upload format.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            image::ImageFormat::Png => Some(SourceFormat::Png),
            _ => None,
        }
    }

    /// Convert to the image crate's format enum.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Png => image::ImageFormat::Png,
        }
    }

    /// MIME type of the format.
    pub fn mime_type(self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Png => "image/png",
        }
    }
}

/// How the camera stored the picture relative to upright, from the EXIF
/// `Orientation` tag. Phone photos of documents are often stored sideways
/// with a tag instead of rotated pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Upright,
    Mirrored,
    UpsideDown,
    UpsideDownMirrored,
    /// Mirrored across the main diagonal
    Transposed,
    /// Needs a quarter turn clockwise
    QuarterCw,
    /// Mirrored across the anti-diagonal
    Transversed,
    /// Needs a quarter turn counter-clockwise
    QuarterCcw,
}

impl Orientation {
    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u32 {
        self as u32 + 1
    }
}

/// Out-of-range tag values are treated as upright.
impl From<u32> for Orientation {
    fn from(tag: u32) -> Self {
        const ALL: [Orientation; 8] = [
            Orientation::Upright,
            Orientation::Mirrored,
            Orientation::UpsideDown,
            Orientation::UpsideDownMirrored,
            Orientation::Transposed,
            Orientation::QuarterCw,
            Orientation::Transversed,
            Orientation::QuarterCcw,
        ];
        tag.checked_sub(1)
            .and_then(|i| ALL.get(i as usize).copied())
            .unwrap_or_default()
    }
}

/// Packed RGB8 pixels, row-major, `width * height * 3` bytes.
///
/// This is the working format of the whole pipeline, from decode through
/// export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        Self { width, height, pixels }
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// RGB value of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_tag_values() {
        assert_eq!(Orientation::from(1), Orientation::Upright);
        assert_eq!(Orientation::from(6), Orientation::QuarterCw);
        assert_eq!(Orientation::from(8), Orientation::QuarterCcw);
        assert_eq!(Orientation::from(0), Orientation::Upright);
        assert_eq!(Orientation::from(99), Orientation::Upright);
        for tag in 1..=8 {
            assert_eq!(Orientation::from(tag).exif_value(), tag);
        }
    }

    #[test]
    fn test_source_format_mapping() {
        assert_eq!(
            SourceFormat::from_image_format(image::ImageFormat::Jpeg),
            Some(SourceFormat::Jpeg)
        );
        assert_eq!(
            SourceFormat::from_image_format(image::ImageFormat::Png),
            Some(SourceFormat::Png)
        );
        assert_eq!(SourceFormat::from_image_format(image::ImageFormat::Gif), None);
        assert_eq!(SourceFormat::Png.to_image_format(), image::ImageFormat::Png);
        assert_eq!(SourceFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_pixel_accessor() {
        let img = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.pixel(0, 0), [1, 2, 3]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn test_rgb_image_round_trip() {
        let img = DecodedImage::new(2, 2, (0..12).collect());
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(DecodedImage::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedFormat("Gif".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported image format: Gif (expected JPEG or PNG)"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unrecognized image format");
    }
}
