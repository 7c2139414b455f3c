//! Shared fixtures for unit tests.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::decode::DecodedImage;
use crate::encode::encode_jpeg;

/// Create a test image where every pixel has a distinct RGB triple.
pub fn gradient_image(width: u32, height: u32) -> DecodedImage {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x % 256) as u8);
            pixels.push((y % 256) as u8);
            pixels.push(((x + y * width) % 251) as u8);
        }
    }
    DecodedImage::new(width, height, pixels)
}

/// Create a single-color test image.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
    let pixels = rgb
        .iter()
        .copied()
        .cycle()
        .take((width * height * 3) as usize)
        .collect();
    DecodedImage::new(width, height, pixels)
}

/// Encode an image as PNG bytes, as a browser upload would deliver it.
pub fn png_bytes(image: &DecodedImage) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .expect("PNG encoding of a test fixture");
    out
}

/// Encode an image as JPEG bytes, as a browser upload would deliver it.
pub fn jpeg_bytes(image: &DecodedImage) -> Vec<u8> {
    encode_jpeg(&image.pixels, image.width, image.height, 95).expect("JPEG encoding of a test fixture")
}
