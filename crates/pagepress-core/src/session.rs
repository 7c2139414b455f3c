//! Upload store, page order and export for one editing session.
//!
//! A [`Session`] owns every uploaded image together with its edit
//! parameters, plus the page order used for combined export. All operations
//! are synchronous and take `&mut self`; the session is never shared.
//!
//! # Invariants
//!
//! - The page order is always a permutation of the uploaded filenames.
//! - A rejected upload leaves the session unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::command::EditCommand;
use crate::config::SessionConfig;
use crate::decode::{decode_image, sniff_format, DecodeError, DecodedImage, SourceFormat};
use crate::encode::{image_to_pdf, EncodeError, PdfBuilder};
use crate::pipeline::{render_decoded, render_preview, RenderedImage};
use crate::{EditParameters, InvalidRotation, Rotation};

/// Download name of the combined PDF.
pub const COMBINED_FILENAME: &str = "documents_combined.pdf";

/// Errors reported by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No upload with this filename
    #[error("Unknown image: {0}")]
    UnknownImage(String),

    /// A page order that is not a permutation of the uploads
    #[error("Invalid page order: {0}")]
    InvalidOrder(String),

    #[error(transparent)]
    InvalidRotation(#[from] InvalidRotation),

    /// Export requested with no uploads
    #[error("No images to export")]
    NothingToExport,

    /// Upload rejected by the decoder
    #[error("Failed to decode '{filename}': {source}")]
    Decode {
        filename: String,
        #[source]
        source: DecodeError,
    },

    /// A page could not be encoded
    #[error("Failed to export '{filename}': {source}")]
    Export {
        filename: String,
        #[source]
        source: EncodeError,
    },
}

/// Summary of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadInfo {
    pub filename: String,
    pub format: SourceFormat,
    /// MIME type matching `format`, for host-side blobs and previews.
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

/// One row of the page order table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRow {
    /// 1-based position in the combined export
    pub page: usize,
    pub filename: String,
    pub style: String,
    /// Rotation in degrees
    pub rotation: i32,
}

struct Upload {
    raw: Arc<[u8]>,
    format: SourceFormat,
    source: DecodedImage,
    params: EditParameters,
}

/// Uploaded images, their edit parameters and the page order.
#[derive(Default)]
pub struct Session {
    config: SessionConfig,
    uploads: HashMap<String, Upload>,
    order: Vec<String>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            uploads: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of uploaded images.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.uploads.contains_key(filename)
    }

    /// Filenames in page order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Decode and store an upload.
    ///
    /// New filenames are appended to the page order. Uploading a filename
    /// that already exists replaces its bytes and resets its parameters, but
    /// keeps its page position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Decode` if the bytes are not a readable JPEG
    /// or PNG; the session is left unchanged.
    pub fn add_upload(
        &mut self,
        filename: impl Into<String>,
        bytes: &[u8],
    ) -> Result<UploadInfo, SessionError> {
        let filename = filename.into();

        let decoded =
            sniff_format(bytes).and_then(|format| decode_image(bytes).map(|img| (format, img)));
        let (format, source) = match decoded {
            Ok(ok) => ok,
            Err(source) => {
                warn!("rejected upload '{}': {}", filename, source);
                return Err(SessionError::Decode { filename, source });
            }
        };

        let upload_info = UploadInfo {
            filename: filename.clone(),
            format,
            mime_type: format.mime_type().to_string(),
            width: source.width,
            height: source.height,
            size_bytes: bytes.len(),
        };

        let upload = Upload {
            raw: Arc::from(bytes),
            format,
            source,
            params: EditParameters::default(),
        };

        if self.uploads.insert(filename.clone(), upload).is_some() {
            info!("replaced upload '{}'", filename);
        } else {
            info!(
                "added upload '{}' ({}x{} {:?})",
                filename, upload_info.width, upload_info.height, format
            );
            self.order.push(filename);
        }

        Ok(upload_info)
    }

    /// Remove one upload and its page.
    pub fn remove_upload(&mut self, filename: &str) -> Result<(), SessionError> {
        if self.uploads.remove(filename).is_none() {
            return Err(SessionError::UnknownImage(filename.to_string()));
        }
        self.order.retain(|name| name != filename);
        info!("removed upload '{}'", filename);
        Ok(())
    }

    /// Drop every upload whose filename is not in `keep`.
    ///
    /// Returns the removed filenames in their former page order.
    pub fn sync_uploads<S: AsRef<str>>(&mut self, keep: &[S]) -> Vec<String> {
        let (kept, removed): (Vec<String>, Vec<String>) = std::mem::take(&mut self.order)
            .into_iter()
            .partition(|name| keep.iter().any(|k| k.as_ref() == name));

        for name in &removed {
            self.uploads.remove(name);
            info!("removed upload '{}'", name);
        }
        self.order = kept;
        removed
    }

    /// Original bytes of an upload.
    pub fn raw_bytes(&self, filename: &str) -> Result<Arc<[u8]>, SessionError> {
        Ok(Arc::clone(&self.upload(filename)?.raw))
    }

    /// Detected format of an upload.
    pub fn format(&self, filename: &str) -> Result<SourceFormat, SessionError> {
        Ok(self.upload(filename)?.format)
    }

    // ========================================================================
    // Edit parameters
    // ========================================================================

    pub fn parameters(&self, filename: &str) -> Result<&EditParameters, SessionError> {
        Ok(&self.upload(filename)?.params)
    }

    /// Replace the parameters of one image wholesale.
    pub fn set_parameters(
        &mut self,
        filename: &str,
        params: EditParameters,
    ) -> Result<(), SessionError> {
        self.upload_mut(filename)?.params = params;
        Ok(())
    }

    /// Apply an edit command and return the refreshed preview.
    pub fn apply(
        &mut self,
        filename: &str,
        command: EditCommand,
    ) -> Result<RenderedImage, SessionError> {
        command.apply(&mut self.upload_mut(filename)?.params);
        debug!("'{}': {:?}", filename, command);
        self.render_preview(filename)
    }

    /// Set the rotation from an angle in degrees.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidRotation` if the angle is not a right angle in
    /// `0..360`; the parameters are left unchanged.
    pub fn set_rotation_degrees(
        &mut self,
        filename: &str,
        degrees: i32,
    ) -> Result<RenderedImage, SessionError> {
        let rotation = Rotation::try_from(degrees)?;
        self.apply(filename, EditCommand::SetRotation(rotation))
    }

    /// Copy the non-geometric parameters of `source` onto every other image.
    ///
    /// Rotation, brightness, contrast and style are copied; each image keeps
    /// its own crop. Returns the number of images updated.
    pub fn apply_to_all(&mut self, source: &str) -> Result<usize, SessionError> {
        let template = self.upload(source)?.params.clone();

        let mut updated = 0;
        for (name, upload) in self.uploads.iter_mut() {
            if name != source {
                upload.params.copy_non_geometry_from(&template);
                updated += 1;
            }
        }

        info!("applied settings of '{}' to {} other image(s)", source, updated);
        Ok(updated)
    }

    // ========================================================================
    // Page order
    // ========================================================================

    /// Replace the page order.
    ///
    /// # Errors
    ///
    /// `SessionError::InvalidOrder` unless `order` names every upload
    /// exactly once.
    pub fn set_order<S: AsRef<str>>(&mut self, order: &[S]) -> Result<(), SessionError> {
        if order.len() != self.order.len() {
            return Err(SessionError::InvalidOrder(format!(
                "expected {} filenames, got {}",
                self.order.len(),
                order.len()
            )));
        }

        let mut new_order: Vec<String> = Vec::with_capacity(order.len());
        for name in order.iter().map(AsRef::as_ref) {
            if !self.uploads.contains_key(name) {
                return Err(SessionError::InvalidOrder(format!("unknown filename '{}'", name)));
            }
            if new_order.iter().any(|seen| seen == name) {
                return Err(SessionError::InvalidOrder(format!("duplicate filename '{}'", name)));
            }
            new_order.push(name.to_string());
        }

        self.order = new_order;
        Ok(())
    }

    /// Move the page at index `from` to index `to` (0-based).
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        let len = self.order.len();
        if from >= len || to >= len {
            return Err(SessionError::InvalidOrder(format!(
                "move {} -> {} out of range for {} page(s)",
                from, to, len
            )));
        }
        let name = self.order.remove(from);
        self.order.insert(to, name);
        Ok(())
    }

    /// Rows of the page order table.
    pub fn page_table(&self) -> Vec<PageRow> {
        self.order
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let params = &self.uploads.get(name)?.params;
                Some(PageRow {
                    page: i + 1,
                    filename: name.clone(),
                    style: params.style.label().to_string(),
                    rotation: params.rotation.degrees(),
                })
            })
            .collect()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Full-resolution render of one image.
    pub fn render(&self, filename: &str) -> Result<RenderedImage, SessionError> {
        let upload = self.upload(filename)?;
        Ok(render_decoded(&upload.source, &upload.params, &self.config.monochrome))
    }

    /// Render downscaled to the configured preview size.
    pub fn render_preview(&self, filename: &str) -> Result<RenderedImage, SessionError> {
        let upload = self.upload(filename)?;
        Ok(render_preview(
            &upload.source,
            &upload.params,
            &self.config.monochrome,
            self.config.preview_max_edge,
        ))
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Download name for the single-page PDF of `filename`.
    pub fn export_filename(filename: &str) -> String {
        format!("{}.pdf", filename)
    }

    /// Export one image as a single-page PDF.
    pub fn export_single(&self, filename: &str) -> Result<Vec<u8>, SessionError> {
        let rendered = self.render(filename)?;
        image_to_pdf(&rendered, &self.config.export).map_err(|source| SessionError::Export {
            filename: filename.to_string(),
            source,
        })
    }

    /// Export every image as its own PDF, in page order.
    pub fn export_all_single(&self) -> Result<Vec<(String, Vec<u8>)>, SessionError> {
        if self.order.is_empty() {
            return Err(SessionError::NothingToExport);
        }
        self.order
            .iter()
            .map(|name| Ok((Self::export_filename(name), self.export_single(name)?)))
            .collect()
    }

    /// Export all images as one PDF, one page per image, in page order.
    pub fn export_combined(&self) -> Result<Vec<u8>, SessionError> {
        self.export_combined_with_progress(|_, _, _| {})
    }

    /// [`Session::export_combined`] with a callback invoked before each page
    /// as `(page_index, page_count, filename)`.
    ///
    /// The first page that fails aborts the whole export.
    pub fn export_combined_with_progress<F>(&self, mut progress: F) -> Result<Vec<u8>, SessionError>
    where
        F: FnMut(usize, usize, &str),
    {
        if self.order.is_empty() {
            return Err(SessionError::NothingToExport);
        }

        let total = self.order.len();
        let mut builder = PdfBuilder::new(self.config.export);
        for (i, name) in self.order.iter().enumerate() {
            progress(i, total, name);
            let rendered = self.render(name)?;
            builder.add_page(&rendered).map_err(|source| {
                warn!("combined export aborted at '{}': {}", name, source);
                SessionError::Export {
                    filename: name.clone(),
                    source,
                }
            })?;
        }

        let bytes = builder.finish().map_err(|source| SessionError::Export {
            filename: COMBINED_FILENAME.to_string(),
            source,
        })?;
        info!("exported {} page(s), {} bytes", total, bytes.len());
        Ok(bytes)
    }

    fn upload(&self, filename: &str) -> Result<&Upload, SessionError> {
        self.uploads
            .get(filename)
            .ok_or_else(|| SessionError::UnknownImage(filename.to_string()))
    }

    fn upload_mut(&mut self, filename: &str) -> Result<&mut Upload, SessionError> {
        self.uploads
            .get_mut(filename)
            .ok_or_else(|| SessionError::UnknownImage(filename.to_string()))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
