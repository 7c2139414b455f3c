//! Stateless pipeline bindings.
//!
//! For hosts that keep their own state: render bytes with a parameter
//! object, or turn a rendered image into a one-page PDF.
//!
//! ```typescript
//! import { render_image, render_to_pdf } from '@pagepress/wasm';
//!
//! const params = { rotation: 90, brightness: 10, contrast: 0, style: 'BlackAndWhite' };
//! const page = render_image(bytes, params);
//! const pdf = render_to_pdf(page, 90);
//! ```

use pagepress_core::encode::image_to_pdf;
use pagepress_core::{render, EditParameters, ExportOptions, MonochromeOptions, RenderedImage};
use wasm_bindgen::prelude::*;

use crate::types::JsRenderedImage;

/// Decode JPEG/PNG bytes and render them with an `EditParameters` object.
///
/// `params` may be `undefined` for identity parameters.
#[wasm_bindgen]
pub fn render_image(bytes: &[u8], params: JsValue) -> Result<JsRenderedImage, JsValue> {
    let params: EditParameters = if params.is_undefined() || params.is_null() {
        EditParameters::default()
    } else {
        serde_wasm_bindgen::from_value(params)
            .map_err(|e| JsValue::from_str(&format!("Invalid parameters: {}", e)))?
    };

    render(bytes, &params, &MonochromeOptions::default())
        .map(JsRenderedImage::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a rendered image as a single-page PDF at 72 dpi.
#[wasm_bindgen]
pub fn render_to_pdf(image: &JsRenderedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let options = ExportOptions {
        jpeg_quality: quality,
        ..Default::default()
    };
    let page = RenderedImage::new(image.width(), image.height(), image.pixels());
    image_to_pdf(&page, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png(width: u32, height: u32) -> Vec<u8> {
        use image::codecs::png::PngEncoder;
        use image::{ExtendedColorType, ImageEncoder};

        let pixels = vec![200u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[wasm_bindgen_test]
    fn test_render_image_identity() {
        let img = render_image(&png(5, 3), JsValue::UNDEFINED).unwrap();
        assert_eq!((img.width(), img.height()), (5, 3));
    }

    #[wasm_bindgen_test]
    fn test_render_image_invalid_bytes() {
        assert!(render_image(b"nope", JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_to_pdf() {
        let img = render_image(&png(5, 3), JsValue::UNDEFINED).unwrap();
        let pdf = render_to_pdf(&img, 90).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.7"));
    }
}
