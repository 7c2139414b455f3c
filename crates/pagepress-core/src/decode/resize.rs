//! Downscaling for live previews.
//!
//! Previews only need to fill the editor pane, so renders are shrunk to a
//! maximum edge before they cross into JavaScript. Exports never go through
//! this module.

use image::imageops::FilterType;

use super::DecodedImage;

/// Resize an image to fit within a maximum edge length while preserving aspect ratio.
///
/// The image is scaled so that its longest edge equals `max_edge`. Images
/// that already fit, and a `max_edge` of zero, return an unchanged copy.
pub fn resize_to_fit(image: &DecodedImage, max_edge: u32) -> DecodedImage {
    if max_edge == 0 || (image.width <= max_edge && image.height <= max_edge) {
        return image.clone();
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_edge);

    match image.to_rgb_image() {
        Some(rgb) => DecodedImage::from_rgb_image(image::imageops::resize(
            &rgb,
            new_width,
            new_height,
            FilterType::Triangle,
        )),
        // Malformed buffers are passed through; the caller only displays them
        None => image.clone(),
    }
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
///
/// Neither output dimension drops below 1 pixel.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), max_edge)
    }
}
