//! Geometry transforms: cropping and right-angle rotation.
//!
//! # Transform Order
//!
//! When rendering an image, transforms are applied in this order:
//! 1. Crop (in source pixel coordinates)
//! 2. Rotation (clockwise quarter turns)
//! 3. Brightness/contrast
//! 4. Style
//!
//! Cropping first keeps the crop box in the coordinate system of the image
//! the user drew it on, whatever rotation is selected afterwards.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Crop corners are in pixels, `(x1, y1)` exclusive

mod crop;
mod rotation;

pub use crop::{apply_crop, clamp_crop};
pub use rotation::{apply_rotation, rotated_dimensions};
