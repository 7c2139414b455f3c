//! Stateful editor session exposed to JavaScript.
//!
//! Uploads, edit parameters and page order all live in Rust; the page only
//! forwards control events and displays the previews it gets back.

use pagepress_core::session::COMBINED_FILENAME;
use pagepress_core::{CropBox, EditCommand, Session, SessionConfig, Style};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::logger;
use crate::types::{JsPdfFile, JsRenderedImage};

/// Host-side configuration: the session config plus the console log level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
struct EditorConfig {
    #[serde(flatten)]
    session: SessionConfig,
    log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Editor state for one page.
#[wasm_bindgen]
pub struct EditorSession {
    inner: Session,
    progress_callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl EditorSession {
    /// Create a session.
    ///
    /// `config` is an optional plain object; missing fields take defaults:
    /// `{ preview_max_edge, export: { jpeg_quality, dpi },
    ///    monochrome: { clip_limit, tile_grid }, log_level }`
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<EditorSession, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        logger::init(logger::parse_level(&config.log_level));
        Ok(Self::with_config(config.session))
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Decode and store an upload. Returns `{ filename, format, mimeType,
    /// width, height, sizeBytes }`.
    #[wasm_bindgen(js_name = addUpload)]
    pub fn add_upload(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let info = self.inner.add_upload(name, bytes).map_err(to_js)?;
        to_value(&info)
    }

    #[wasm_bindgen(js_name = removeUpload)]
    pub fn remove_upload(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.remove_upload(name).map_err(to_js)
    }

    /// Keep only the named uploads. Returns the removed names.
    #[wasm_bindgen(js_name = syncUploads)]
    pub fn sync_uploads(&mut self, names: Vec<String>) -> Vec<String> {
        self.inner.sync_uploads(&names)
    }

    #[wasm_bindgen(getter, js_name = uploadCount)]
    pub fn upload_count(&self) -> usize {
        self.inner.len()
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Current edit parameters of one image.
    pub fn parameters(&self, name: &str) -> Result<JsValue, JsValue> {
        let params = self.inner.parameters(name).map_err(to_js)?;
        to_value(params)
    }

    #[wasm_bindgen(js_name = setCrop)]
    pub fn set_crop(
        &mut self,
        name: &str,
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
    ) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::SetCrop(CropBox::new(x0, y0, x1, y1)))
    }

    #[wasm_bindgen(js_name = clearCrop)]
    pub fn clear_crop(&mut self, name: &str) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::ClearCrop)
    }

    /// Set rotation in degrees (0, 90, 180 or 270).
    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&mut self, name: &str, degrees: i32) -> Result<JsRenderedImage, JsValue> {
        self.inner
            .set_rotation_degrees(name, degrees)
            .map(JsRenderedImage::from)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = rotateClockwise)]
    pub fn rotate_clockwise(&mut self, name: &str) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::RotateClockwise)
    }

    #[wasm_bindgen(js_name = setBrightness)]
    pub fn set_brightness(&mut self, name: &str, value: i32) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::SetBrightness(value))
    }

    #[wasm_bindgen(js_name = setContrast)]
    pub fn set_contrast(&mut self, name: &str, value: i32) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::SetContrast(value))
    }

    /// Set the style by name: "original" or "black & white" (also "bw").
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, name: &str, style: &str) -> Result<JsRenderedImage, JsValue> {
        let style = parse_style(style).map_err(|e| JsValue::from_str(&e))?;
        self.apply(name, EditCommand::SetStyle(style))
    }

    pub fn reset(&mut self, name: &str) -> Result<JsRenderedImage, JsValue> {
        self.apply(name, EditCommand::Reset)
    }

    /// Copy rotation, brightness, contrast and style to every other image.
    #[wasm_bindgen(js_name = applyToAll)]
    pub fn apply_to_all(&mut self, name: &str) -> Result<usize, JsValue> {
        self.inner.apply_to_all(name).map_err(to_js)
    }

    pub fn preview(&self, name: &str) -> Result<JsRenderedImage, JsValue> {
        self.inner
            .render_preview(name)
            .map(JsRenderedImage::from)
            .map_err(to_js)
    }

    // ========================================================================
    // Page order
    // ========================================================================

    pub fn order(&self) -> Vec<String> {
        self.inner.order().to_vec()
    }

    #[wasm_bindgen(js_name = setOrder)]
    pub fn set_order(&mut self, names: Vec<String>) -> Result<(), JsValue> {
        self.inner.set_order(&names).map_err(to_js)
    }

    #[wasm_bindgen(js_name = movePage)]
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.inner.move_page(from, to).map_err(to_js)
    }

    /// Rows `{ page, filename, style, rotation }` in page order.
    #[wasm_bindgen(js_name = pageTable)]
    pub fn page_table(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.page_table())
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Progress callback for combined export.
    /// Callback signature: (current: number, total: number, filename: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    #[wasm_bindgen(js_name = exportSingle)]
    pub fn export_single(&self, name: &str) -> Result<JsPdfFile, JsValue> {
        let bytes = self.inner.export_single(name).map_err(to_js)?;
        Ok(JsPdfFile::new(Session::export_filename(name), bytes))
    }

    /// One PDF per image, in page order, as an array of `JsPdfFile`.
    #[wasm_bindgen(js_name = exportAllSingle)]
    pub fn export_all_single(&self) -> Result<js_sys::Array, JsValue> {
        let files = self.inner.export_all_single().map_err(to_js)?;
        Ok(files
            .into_iter()
            .map(|(name, bytes)| JsValue::from(JsPdfFile::new(name, bytes)))
            .collect())
    }

    /// All images as one PDF, one page per image, in page order.
    #[wasm_bindgen(js_name = exportCombined)]
    pub fn export_combined(&self) -> Result<JsPdfFile, JsValue> {
        let bytes = self
            .inner
            .export_combined_with_progress(|current, total, filename| {
                self.report_progress(current, total, filename)
            })
            .map_err(to_js)?;
        let total = self.inner.len();
        self.report_progress(total, total, COMBINED_FILENAME);
        Ok(JsPdfFile::new(COMBINED_FILENAME.to_string(), bytes))
    }
}

impl EditorSession {
    fn with_config(config: SessionConfig) -> Self {
        Self {
            inner: Session::new(config),
            progress_callback: None,
        }
    }

    fn apply(&mut self, name: &str, command: EditCommand) -> Result<JsRenderedImage, JsValue> {
        self.inner
            .apply(name, command)
            .map(JsRenderedImage::from)
            .map_err(to_js)
    }

    fn report_progress(&self, current: usize, total: usize, filename: &str) {
        if let Some(ref callback) = self.progress_callback {
            let _ = callback.call3(
                &JsValue::null(),
                &JsValue::from(current as u32),
                &JsValue::from(total as u32),
                &JsValue::from_str(filename),
            );
        }
    }
}

/// Map a style name from the style selector to a [`Style`].
fn parse_style(name: &str) -> Result<Style, String> {
    match name.trim().to_ascii_lowercase().as_str() {
        "original" => Ok(Style::Original),
        "black & white" | "black_and_white" | "blackandwhite" | "bw" => Ok(Style::BlackAndWhite),
        other => Err(format!("Unknown style: {}", other)),
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
