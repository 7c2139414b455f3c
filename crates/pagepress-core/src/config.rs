//! Session configuration.
//!
//! Every field has a default so the host can pass a partial object (or
//! nothing at all) and only override what it cares about.

use serde::{Deserialize, Serialize};

/// Default longest edge of live preview renders, in pixels.
pub const DEFAULT_PREVIEW_MAX_EDGE: u32 = 1024;

/// Default JPEG quality for page images embedded in exported PDFs.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Resolution at which one pixel maps to one PDF point.
pub const DEFAULT_DPI: f32 = 72.0;

/// Options for PDF export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// JPEG quality (1-100) of the embedded page images
    pub jpeg_quality: u8,
    /// Pixels per inch used to size pages (72 = one pixel per point)
    pub dpi: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            dpi: DEFAULT_DPI,
        }
    }
}

impl ExportOptions {
    /// Scale factor from pixels to PDF points.
    ///
    /// Non-positive or non-finite dpi values fall back to 72.
    pub fn points_per_pixel(&self) -> f32 {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            72.0 / self.dpi
        } else {
            1.0
        }
    }
}

/// Options for the black-and-white style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonochromeOptions {
    /// CLAHE clip limit (relative to a uniform histogram)
    pub clip_limit: f32,
    /// Number of tiles along each axis
    pub tile_grid: u32,
}

impl Default for MonochromeOptions {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: 8,
        }
    }
}

/// Configuration for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Longest edge of preview renders in pixels
    pub preview_max_edge: u32,
    /// PDF export options
    pub export: ExportOptions,
    /// Black-and-white style options
    pub monochrome: MonochromeOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_max_edge: DEFAULT_PREVIEW_MAX_EDGE,
            export: ExportOptions::default(),
            monochrome: MonochromeOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.preview_max_edge, 1024);
        assert_eq!(config.export.jpeg_quality, 90);
        assert_eq!(config.export.dpi, 72.0);
        assert_eq!(config.monochrome.clip_limit, 2.0);
        assert_eq!(config.monochrome.tile_grid, 8);
    }

    #[test]
    fn test_points_per_pixel() {
        let mut opts = ExportOptions::default();
        assert!((opts.points_per_pixel() - 1.0).abs() < f32::EPSILON);

        opts.dpi = 144.0;
        assert!((opts.points_per_pixel() - 0.5).abs() < f32::EPSILON);

        opts.dpi = 0.0;
        assert!((opts.points_per_pixel() - 1.0).abs() < f32::EPSILON);

        opts.dpi = f32::NAN;
        assert!((opts.points_per_pixel() - 1.0).abs() < f32::EPSILON);
    }
}
