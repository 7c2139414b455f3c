//! Export encoding for PagePress.
//!
//! This module provides functionality for:
//! - Encoding rendered pages to JPEG with configurable quality
//! - Assembling one or more encoded pages into a PDF document
//!
//! # Page Model
//!
//! Each rendered image becomes one PDF page whose media box is the image
//! size scaled by `72 / dpi`. The page content draws the JPEG-compressed
//! image over the whole media box, so the page keeps the image's aspect
//! ratio exactly.
//!
//! # Examples
//!
//! ```ignore
//! use pagepress_core::encode::PdfBuilder;
//! use pagepress_core::ExportOptions;
//!
//! let mut pdf = PdfBuilder::new(ExportOptions::default());
//! pdf.add_page(&first)?;
//! pdf.add_page(&second)?;
//! let bytes = pdf.finish()?;
//! ```

mod error;
mod jpeg;
mod pdf;

pub use error::EncodeError;
pub use jpeg::encode_jpeg;
pub use pdf::{image_to_pdf, images_to_pdf, PdfBuilder, PDF_VERSION, PRODUCER};
