//! Image cropping in source pixel coordinates.
//!
//! Crop rectangles come straight from the crop selector widget, which can
//! hand over boxes that hang past the image edge or have collapsed to zero
//! size while the user drags. Such boxes are clamped rather than rejected so
//! the preview always renders.
//!
//! # Clamping Rules
//!
//! - The origin is clamped into the image (at most the last row/column)
//! - The far corner is clamped to the image edge
//! - A box that ends up empty grows to 1x1 at its clamped origin

use log::debug;

use crate::decode::DecodedImage;
use crate::CropBox;

/// Clamp a crop box to a `width x height` image.
///
/// The result always lies inside the image and is at least 1x1, provided
/// the image itself is non-empty.
pub fn clamp_crop(crop: &CropBox, width: u32, height: u32) -> CropBox {
    let x0 = crop.x0.min(width.saturating_sub(1));
    let y0 = crop.y0.min(height.saturating_sub(1));
    let x1 = crop.x1.min(width).max(x0 + 1);
    let y1 = crop.y1.min(height).max(y0 + 1);
    CropBox { x0, y0, x1, y1 }
}

/// Apply a crop box to an image.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `crop` - Rectangle in source pixel coordinates (clamped, see module docs)
///
/// # Returns
///
/// A new `DecodedImage` containing only the cropped region, with
/// `width == x1 - x0` and `height == y1 - y0` of the clamped box.
pub fn apply_crop(image: &DecodedImage, crop: &CropBox) -> DecodedImage {
    if image.is_empty() || crop.covers(image.width, image.height) {
        return image.clone();
    }

    let clamped = clamp_crop(crop, image.width, image.height);
    if clamped != *crop {
        debug!(
            "crop {:?} clamped to {:?} for {}x{} image",
            crop, clamped, image.width, image.height
        );
    }

    let out_width = clamped.width();
    let out_height = clamped.height();
    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;

    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row
    for y in clamped.y0..clamped.y1 {
        let start = y as usize * src_stride + clamped.x0 as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
