//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Grayscale conversion for the black-and-white style uses the same weights
//! as common document scanners and JPEG's YCbCr, so a color scan and its
//! monochrome render keep matching perceived brightness.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from u8 RGB values (0 to 255).
///
/// # Returns
/// Luma value (0-255), rounded to nearest.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Convert packed RGB pixel data to one luma byte per pixel.
pub fn rgb_to_luma(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect()
}

/// Expand one luma byte per pixel back to packed RGB.
pub fn luma_to_rgb(luma: &[u8]) -> Vec<u8> {
    luma.iter().flat_map(|&v| [v, v, v]).collect()
}
