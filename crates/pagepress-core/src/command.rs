//! Edit commands issued by the editor controls.
//!
//! Each control in the editor pane maps to one command. Commands only touch
//! the parameters of a single image; broadcasting is done by the session.

use serde::{Deserialize, Serialize};

use crate::{CropBox, EditParameters, Rotation, Style, BRIGHTNESS_RANGE, CONTRAST_RANGE};

/// A single change to an image's edit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EditCommand {
    SetCrop(CropBox),
    ClearCrop,
    SetRotation(Rotation),
    /// Advance the rotation by 90 degrees clockwise.
    RotateClockwise,
    /// Brightness offset, clamped to [`BRIGHTNESS_RANGE`].
    SetBrightness(i32),
    /// Contrast offset in percent, clamped to [`CONTRAST_RANGE`].
    SetContrast(i32),
    SetStyle(Style),
    /// Restore identity parameters.
    Reset,
}

impl EditCommand {
    /// Apply the command to `params`.
    pub fn apply(&self, params: &mut EditParameters) {
        match *self {
            EditCommand::SetCrop(crop) => params.crop = Some(crop),
            EditCommand::ClearCrop => params.crop = None,
            EditCommand::SetRotation(rotation) => params.rotation = rotation,
            EditCommand::RotateClockwise => params.rotation = params.rotation.clockwise(),
            EditCommand::SetBrightness(value) => {
                params.brightness = value.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);
            }
            EditCommand::SetContrast(value) => {
                params.contrast = value.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
            }
            EditCommand::SetStyle(style) => params.style = style,
            EditCommand::Reset => *params = EditParameters::default(),
        }
    }
}
