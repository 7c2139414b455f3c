//! Image decoding for PagePress uploads.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG uploads to RGB pixel data
//! - Applying EXIF orientation so pixel coordinates match what the user sees
//! - Downscaling decoded images for live previews
//!
//! # Architecture
//!
//! Decoding runs synchronously inside the WASM instance that owns the
//! editing session. Uploads are decoded once and the result is kept next to
//! the raw bytes; previews and exports start from that decoded copy.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, sniff_format};
pub use resize::{fit_dimensions, resize_to_fit};
pub use types::{DecodeError, DecodedImage, Orientation, SourceFormat};
