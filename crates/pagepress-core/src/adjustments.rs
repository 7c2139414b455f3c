//! Brightness and contrast.
//!
//! Both sliders feed one linear transform on pixel intensity:
//!
//! ```text
//! gain   = 1 + contrast / 100
//! output = clamp(round(gain * input + brightness), 0, 255)
//! ```
//!
//! The transform is applied to every channel independently and saturates at
//! the ends of the range instead of wrapping.

/// Gain factor for a contrast offset, never negative.
#[inline]
pub fn contrast_gain(contrast: i32) -> f32 {
    (1.0 + contrast as f32 / 100.0).max(0.0)
}

/// Build the 256-entry lookup table for a brightness/contrast pair.
pub fn build_lut(brightness: i32, contrast: i32) -> [u8; 256] {
    let gain = contrast_gain(contrast);
    let offset = brightness as f32;
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (gain * i as f32 + offset).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply brightness and contrast to RGB pixel data in place.
///
/// # Arguments
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `brightness` - Additive offset on 0-255 intensity
/// * `contrast` - Percentage offset on the gain
///
/// # Example
/// ```
/// use pagepress_core::adjustments::apply_brightness_contrast;
///
/// let mut pixels = vec![100, 100, 100];
/// apply_brightness_contrast(&mut pixels, 20, 0);
/// assert_eq!(pixels, vec![120, 120, 120]);
/// ```
pub fn apply_brightness_contrast(pixels: &mut [u8], brightness: i32, contrast: i32) {
    // Early exit if no adjustments
    if brightness == 0 && contrast == 0 {
        return;
    }

    let lut = build_lut(brightness, contrast);
    for value in pixels.iter_mut() {
        *value = lut[*value as usize];
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The transform is monotonic non-decreasing in the input.
        #[test]
        fn prop_lut_monotonic(brightness in -100i32..=100, contrast in -100i32..=200) {
            let lut = build_lut(brightness, contrast);
            for pair in lut.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        /// Property: Positive brightness never darkens a pixel at neutral contrast.
        #[test]
        fn prop_brightness_never_darkens(
            brightness in 0i32..=100,
            pixels in proptest::collection::vec(any::<u8>(), 3..60),
        ) {
            let mut adjusted = pixels.clone();
            apply_brightness_contrast(&mut adjusted, brightness, 0);
            for (before, after) in pixels.iter().zip(adjusted.iter()) {
                prop_assert!(after >= before);
            }
        }
    }
}
