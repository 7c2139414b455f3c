//! The edit pipeline.
//!
//! Every render runs the same fixed sequence on a fresh copy of the source:
//!
//! ```text
//! decode -> crop -> rotate -> brightness/contrast -> style
//! ```
//!
//! Rendering is a pure function of the source and its [`EditParameters`], so
//! the same inputs always produce bit-identical pixels.

use log::debug;

use crate::adjustments::apply_brightness_contrast;
use crate::config::MonochromeOptions;
use crate::decode::{decode_image, resize_to_fit, DecodeError, DecodedImage};
use crate::monochrome::apply_black_and_white;
use crate::transform::{apply_crop, apply_rotation};
use crate::{EditParameters, Style};

/// Output of the pipeline: an RGB8 buffer ready for preview or export.
pub type RenderedImage = DecodedImage;

/// Decode uploaded bytes and render them with `params`.
///
/// # Errors
///
/// Returns `DecodeError` if the bytes are not a readable JPEG or PNG.
pub fn render(
    bytes: &[u8],
    params: &EditParameters,
    monochrome: &MonochromeOptions,
) -> Result<RenderedImage, DecodeError> {
    let source = decode_image(bytes)?;
    Ok(render_decoded(&source, params, monochrome))
}

/// Render an already decoded source image with `params`.
pub fn render_decoded(
    source: &DecodedImage,
    params: &EditParameters,
    monochrome: &MonochromeOptions,
) -> RenderedImage {
    let mut image = match &params.crop {
        Some(crop) => apply_crop(source, crop),
        None => source.clone(),
    };

    image = apply_rotation(&image, params.rotation);

    apply_brightness_contrast(&mut image.pixels, params.brightness, params.contrast);

    if params.style == Style::BlackAndWhite {
        image = apply_black_and_white(&image, monochrome);
    }

    debug!(
        "rendered {}x{} -> {}x{} ({:?}, b={}, c={}, {:?})",
        source.width,
        source.height,
        image.width,
        image.height,
        params.rotation,
        params.brightness,
        params.contrast,
        params.style
    );

    image
}

/// Render at full resolution, then shrink to fit within `max_edge`.
///
/// Only the returned buffer is small. Every stage, CLAHE included, still
/// runs on the full-size source, so the preview shows exactly what export
/// will produce. A `max_edge` of zero disables downscaling.
pub fn render_preview(
    source: &DecodedImage,
    params: &EditParameters,
    monochrome: &MonochromeOptions,
    max_edge: u32,
) -> RenderedImage {
    resize_to_fit(&render_decoded(source, params, monochrome), max_edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient_image, png_bytes, solid_image};
    use crate::{CropBox, Rotation};

    fn mono() -> MonochromeOptions {
        MonochromeOptions::default()
    }

    #[test]
    fn test_default_params_are_identity() {
        let source = gradient_image(20, 10);
        let result = render_decoded(&source, &EditParameters::default(), &mono());
        assert_eq!(result, source);
    }

    #[test]
    fn test_render_from_png_bytes() {
        let source = gradient_image(12, 7);
        let result = render(&png_bytes(&source), &EditParameters::default(), &mono()).unwrap();
        assert_eq!(result, source);
    }

    #[test]
    fn test_render_rejects_garbage() {
        let result = render(b"definitely not an image", &EditParameters::default(), &mono());
        assert!(result.is_err());
    }

    #[test]
    fn test_crop_then_rotate_order() {
        let source = gradient_image(100, 60);
        let params = EditParameters {
            crop: Some(CropBox::new(10, 5, 50, 25)),
            rotation: Rotation::Deg90,
            ..Default::default()
        };

        let result = render_decoded(&source, &params, &mono());

        // Crop is taken in source coordinates, then the 40x20 region rotates
        assert_eq!((result.width, result.height), (20, 40));
        // Bottom-left of the crop (10, 24) lands at the top-left after 90 CW
        assert_eq!(result.pixel(0, 0), source.pixel(10, 24));
    }

    #[test]
    fn test_out_of_bounds_crop_is_clamped() {
        let source = gradient_image(30, 30);
        let params = EditParameters {
            crop: Some(CropBox::new(20, 20, 500, 500)),
            ..Default::default()
        };
        let result = render_decoded(&source, &params, &mono());
        assert_eq!((result.width, result.height), (10, 10));
    }

    #[test]
    fn test_brightness_applied_after_geometry() {
        let source = solid_image(4, 4, [100, 100, 100]);
        let params = EditParameters {
            brightness: 50,
            rotation: Rotation::Deg180,
            ..Default::default()
        };
        let result = render_decoded(&source, &params, &mono());
        assert!(result.pixels.iter().all(|&v| v == 150));
    }

    #[test]
    fn test_black_and_white_output_is_gray() {
        let params = EditParameters {
            style: Style::BlackAndWhite,
            ..Default::default()
        };
        let result = render_decoded(&gradient_image(24, 16), &params, &mono());
        for px in result.pixels.chunks_exact(3) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let source = gradient_image(37, 23);
        let params = EditParameters {
            crop: Some(CropBox::new(3, 2, 30, 20)),
            rotation: Rotation::Deg270,
            brightness: -15,
            contrast: 40,
            style: Style::BlackAndWhite,
        };
        let a = render_decoded(&source, &params, &mono());
        let b = render_decoded(&source, &params, &mono());
        assert_eq!(a, b);
    }

    #[test]
    fn test_preview_is_downscaled() {
        let source = gradient_image(400, 100);
        let preview = render_preview(&source, &EditParameters::default(), &mono(), 100);
        assert_eq!((preview.width, preview.height), (100, 25));
    }

    #[test]
    fn test_preview_is_downscaled_full_render() {
        let source = gradient_image(120, 80);
        let params = EditParameters {
            crop: Some(CropBox::new(10, 0, 110, 80)),
            rotation: Rotation::Deg90,
            brightness: 15,
            contrast: 30,
            style: Style::BlackAndWhite,
        };

        let preview = render_preview(&source, &params, &mono(), 40);
        let full = render_decoded(&source, &params, &mono());
        assert_eq!((preview.width, preview.height), (32, 40));
        assert_eq!(preview, resize_to_fit(&full, 40));
    }

    #[test]
    fn test_preview_small_image_unchanged() {
        let source = gradient_image(40, 30);
        let preview = render_preview(&source, &EditParameters::default(), &mono(), 1024);
        assert_eq!(preview, source);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
