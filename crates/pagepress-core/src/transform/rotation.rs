//! Lossless right-angle rotation.
//!
//! Only quarter turns are supported, so every output pixel is an exact copy
//! of one source pixel and no interpolation is involved. For a source pixel
//! at `(x, y)` in a `w x h` image, clockwise rotation maps it to:
//!
//! ```text
//!  90:  (h - 1 - y, x)
//! 180:  (w - 1 - x, h - 1 - y)
//! 270:  (y, w - 1 - x)
//! ```

use crate::decode::DecodedImage;
use crate::Rotation;

/// Dimensions of a `width x height` image after `rotation`.
pub fn rotated_dimensions(width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    if rotation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate an image clockwise by a right angle.
///
/// # Returns
///
/// New `DecodedImage` with the rotated content; 90 and 270 degree rotations
/// swap width and height.
pub fn apply_rotation(image: &DecodedImage, rotation: Rotation) -> DecodedImage {
    if rotation == Rotation::Deg0 || image.is_empty() {
        return image.clone();
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = rotated_dimensions(image.width, image.height, rotation);
    let dst_stride = dst_w as usize;

    let mut output = vec![0u8; image.pixels.len()];

    for (src_idx, chunk) in image.pixels.chunks_exact(3).enumerate() {
        let (x, y) = (src_idx % w, src_idx / w);
        let (dx, dy) = match rotation {
            Rotation::Deg90 => (h - 1 - y, x),
            Rotation::Deg180 => (w - 1 - x, h - 1 - y),
            Rotation::Deg270 => (y, w - 1 - x),
            Rotation::Deg0 => (x, y),
        };
        let dst_idx = (dy * dst_stride + dx) * 3;
        output[dst_idx..dst_idx + 3].copy_from_slice(chunk);
    }

    DecodedImage::new(dst_w, dst_h, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
