//! WASM-compatible wrapper types.

use pagepress_core::RenderedImage;
use wasm_bindgen::prelude::*;

/// A rendered page image handed to JavaScript for display.
///
/// Pixels are packed RGB, 3 bytes per pixel, row-major. The host converts
/// them to RGBA `ImageData` for a canvas.
#[wasm_bindgen]
pub struct JsRenderedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRenderedImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    #[wasm_bindgen(js_name = rgbaPixels)]
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }
}

impl From<RenderedImage> for JsRenderedImage {
    fn from(img: RenderedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}

/// A finished PDF plus its suggested download name.
#[wasm_bindgen]
pub struct JsPdfFile {
    name: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsPdfFile {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// PDF bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl JsPdfFile {
    pub(crate) fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }
}
