//! Errors raised while encoding pages for export.

use thiserror::Error;

/// Errors that can occur during page encoding and PDF assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// A PDF needs at least one page
    #[error("PDF has no pages")]
    NoPages,

    /// Serializing the PDF document failed
    #[error("PDF writing failed: {0}")]
    PdfWriteFailed(String),
}
