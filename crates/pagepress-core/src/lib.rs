//! PagePress Core - Image edit pipeline and PDF export
//!
//! This crate provides the engine behind the PagePress editor: a per-session
//! store of uploaded images, the edit pipeline that renders each image from
//! its edit parameters, and the assembler that turns rendered pages into PDF
//! documents.

pub mod adjustments;
pub mod command;
pub mod config;
pub mod decode;
pub mod encode;
pub mod luminance;
pub mod monochrome;
pub mod pipeline;
pub mod session;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use command::EditCommand;
pub use config::{ExportOptions, MonochromeOptions, SessionConfig};
pub use pipeline::{render, render_decoded, render_preview, RenderedImage};
pub use session::{PageRow, Session, SessionError, UploadInfo};
pub use transform::{apply_crop, apply_rotation};

use serde::{Deserialize, Serialize};

/// Brightness slider range (additive offset on 0-255 intensity).
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);

/// Contrast slider range (percentage offset on the gain, gain = 1 + c/100).
pub const CONTRAST_RANGE: (i32, i32) = (-100, 200);

/// Crop rectangle in source pixel coordinates.
///
/// `(x0, y0)` is the top-left corner (inclusive) and `(x1, y1)` the
/// bottom-right corner (exclusive), so the width is `x1 - x0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropBox {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle, zero if the corners are inverted.
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height of the rectangle, zero if the corners are inverted.
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Check if the rectangle covers the whole of a `width x height` image.
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x0 == 0 && self.y0 == 0 && self.x1 >= width && self.y1 >= height
    }
}

/// Clockwise rotation in right-angle steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Rotation angle in degrees (0, 90, 180 or 270).
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Next rotation step clockwise (wraps 270 back to 0).
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// The rotation that undoes this one, i.e. `(360 - r) mod 360`.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Error returned when an angle is not one of 0, 90, 180 or 270.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid rotation: {0} degrees (expected 0, 90, 180 or 270)")]
pub struct InvalidRotation(pub i32);

impl TryFrom<i32> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for i32 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

/// Output style applied at the end of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Style {
    /// Colors pass through unchanged.
    #[default]
    Original,
    /// High-contrast monochrome (luma + CLAHE).
    BlackAndWhite,
}

impl Style {
    /// Label shown in the page order table.
    pub fn label(self) -> &'static str {
        match self {
            Style::Original => "Original",
            Style::BlackAndWhite => "Black & White",
        }
    }
}

/// Per-image edit parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditParameters {
    /// Optional crop rectangle in source pixel coordinates
    pub crop: Option<CropBox>,
    /// Clockwise rotation
    pub rotation: Rotation,
    /// Brightness offset (-100 to 100)
    pub brightness: i32,
    /// Contrast offset in percent (-100 to 200)
    pub contrast: i32,
    /// Output style
    pub style: Style,
}

impl EditParameters {
    /// Create parameters with identity values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Copy everything except the crop box from `source`.
    ///
    /// The crop box is tied to the geometry of one particular image, so it
    /// stays with the target.
    pub fn copy_non_geometry_from(&mut self, source: &EditParameters) {
        self.rotation = source.rotation;
        self.brightness = source.brightness;
        self.contrast = source.contrast;
        self.style = source.style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_parameters_default() {
        let params = EditParameters::new();
        assert!(params.is_default());
        assert_eq!(params.rotation, Rotation::Deg0);
        assert_eq!(params.style, Style::Original);
        assert!(params.crop.is_none());
    }

    #[test]
    fn test_edit_parameters_not_default() {
        let mut params = EditParameters::new();
        params.brightness = 10;
        assert!(!params.is_default());
    }

    #[test]
    fn test_rotation_try_from() {
        assert_eq!(Rotation::try_from(0), Ok(Rotation::Deg0));
        assert_eq!(Rotation::try_from(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::try_from(180), Ok(Rotation::Deg180));
        assert_eq!(Rotation::try_from(270), Ok(Rotation::Deg270));
        assert_eq!(Rotation::try_from(45), Err(InvalidRotation(45)));
        assert_eq!(Rotation::try_from(360), Err(InvalidRotation(360)));
        assert_eq!(Rotation::try_from(-90), Err(InvalidRotation(-90)));
    }

    #[test]
    fn test_rotation_clockwise_wraps() {
        let mut r = Rotation::Deg0;
        for expected in [90, 180, 270, 0] {
            r = r.clockwise();
            assert_eq!(r.degrees(), expected);
        }
    }

    #[test]
    fn test_rotation_inverse() {
        for r in [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
            let total = (r.degrees() + r.inverse().degrees()) % 360;
            assert_eq!(total, 0, "{:?} + inverse should be a full turn", r);
        }
    }

    #[test]
    fn test_rotation_into_degrees() {
        assert_eq!(i32::from(Rotation::Deg270), 270);
        assert_eq!(i32::from(Rotation::default()), 0);
    }

    #[test]
    fn test_crop_box_dimensions() {
        let crop = CropBox::new(10, 20, 110, 70);
        assert_eq!(crop.width(), 100);
        assert_eq!(crop.height(), 50);

        let inverted = CropBox::new(50, 50, 10, 10);
        assert_eq!(inverted.width(), 0);
        assert_eq!(inverted.height(), 0);
    }

    #[test]
    fn test_crop_box_covers() {
        assert!(CropBox::new(0, 0, 100, 50).covers(100, 50));
        assert!(CropBox::new(0, 0, 200, 80).covers(100, 50));
        assert!(!CropBox::new(1, 0, 100, 50).covers(100, 50));
    }

    #[test]
    fn test_copy_non_geometry_keeps_crop() {
        let source = EditParameters {
            crop: Some(CropBox::new(0, 0, 5, 5)),
            rotation: Rotation::Deg180,
            brightness: 40,
            contrast: -20,
            style: Style::BlackAndWhite,
        };
        let mut target = EditParameters {
            crop: Some(CropBox::new(1, 1, 9, 9)),
            ..Default::default()
        };

        target.copy_non_geometry_from(&source);

        assert_eq!(target.rotation, Rotation::Deg180);
        assert_eq!(target.brightness, 40);
        assert_eq!(target.contrast, -20);
        assert_eq!(target.style, Style::BlackAndWhite);
        assert_eq!(target.crop, Some(CropBox::new(1, 1, 9, 9)));
    }

    #[test]
    fn test_style_labels() {
        assert_eq!(Style::Original.label(), "Original");
        assert_eq!(Style::BlackAndWhite.label(), "Black & White");
    }
}
