//! JPEG/PNG upload decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use log::debug;

use super::{DecodeError, DecodedImage, Orientation, SourceFormat};

/// Identify the upload format from its leading bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if no known signature matches and
/// `DecodeError::UnsupportedFormat` for images that are not JPEG or PNG.
pub fn sniff_format(bytes: &[u8]) -> Result<SourceFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    SourceFormat::from_image_format(format)
        .ok_or_else(|| DecodeError::UnsupportedFormat(format!("{:?}", format)))
}

/// Decode an uploaded JPEG or PNG, applying EXIF orientation correction.
///
/// The format is detected from the content, not from the filename.
///
/// # Errors
///
/// - `DecodeError::InvalidFormat` / `UnsupportedFormat` for non JPEG/PNG data
/// - `DecodeError::CorruptedFile` if the data is truncated or corrupt
/// - `DecodeError::EmptyImage` if the image has a zero dimension
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format = sniff_format(bytes)?;
    let img = decode_dynamic(bytes, format)?;
    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Upright {
        debug!("applying EXIF orientation {}", orientation.exif_value());
    }
    into_decoded(apply_orientation(img, orientation))
}

fn decode_dynamic(bytes: &[u8], format: SourceFormat) -> Result<DynamicImage, DecodeError> {
    image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn into_decoded(img: DynamicImage) -> Result<DecodedImage, DecodeError> {
    let rgb = img.into_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    Ok(DecodedImage::from_rgb_image(rgb))
}

/// Missing or unreadable EXIF data counts as upright.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Upright => img,
        Orientation::Mirrored => img.fliph(),
        Orientation::UpsideDown => img.rotate180(),
        Orientation::UpsideDownMirrored => img.flipv(),
        Orientation::Transposed => img.rotate90().fliph(),
        Orientation::QuarterCw => img.rotate90(),
        Orientation::Transversed => img.rotate270().fliph(),
        Orientation::QuarterCcw => img.rotate270(),
    }
}
