//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Calculate the output dimensions of a variant.
///
/// Rules are checked in order; the first one that applies decides:
///
/// 1. No target at all → `original`.
/// 2. Any given target ≤ 0 → `original`.
/// 3. Both targets given and either exceeds the original → `original`.
/// 4. One target given and it is ≥ the original along that axis → `original`.
/// 5. Both targets given and equal → exactly `target × target`.
/// 6. Otherwise the missing (or, when both are given, the height) dimension is
///    derived from the width or height target, preserving aspect ratio.
///
/// Derived values are computed exactly and rounded half to even.
///
/// # Examples
/// ```
/// # use blob_variants::imaging::{Dimensions, calculate_resized_dimensions};
/// let original = Dimensions::new(256, 128);
/// assert_eq!(calculate_resized_dimensions(original, Some(100), None), Dimensions::new(100, 50));
/// assert_eq!(calculate_resized_dimensions(original, None, Some(100)), Dimensions::new(200, 100));
/// assert_eq!(calculate_resized_dimensions(original, Some(128), Some(128)), Dimensions::new(128, 128));
/// ```
pub fn calculate_resized_dimensions(
    original: Dimensions,
    target_width: Option<i32>,
    target_height: Option<i32>,
) -> Dimensions {
    if target_width.is_none() && target_height.is_none() {
        return original;
    }

    // Never resize to zero
    if target_width.is_some_and(|w| w <= 0) || target_height.is_some_and(|h| h <= 0) {
        return original;
    }

    // Both are positive from here on
    let width = target_width.map(|w| w as u32);
    let height = target_height.map(|h| h as u32);

    match (width, height) {
        (Some(w), Some(h)) => {
            if w > original.width || h > original.height {
                original
            } else if w == h {
                Dimensions::new(w, h)
            } else {
                Dimensions::new(w, scale(original.height, w, original.width))
            }
        }
        (Some(w), None) => {
            if w >= original.width {
                original
            } else {
                Dimensions::new(w, scale(original.height, w, original.width))
            }
        }
        (None, Some(h)) => {
            if h >= original.height {
                original
            } else {
                Dimensions::new(scale(original.width, h, original.height), h)
            }
        }
        (None, None) => original,
    }
}

/// `value * numerator / denominator`, rounded half to even.
///
/// Callers guarantee `0 < numerator <= denominator`, so the result fits in u32.
fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let product = u64::from(value) * u64::from(numerator);
    let denominator = u64::from(denominator);
    let quotient = product / denominator;
    let twice_remainder = (product % denominator) * 2;

    let rounded = if twice_remainder > denominator
        || (twice_remainder == denominator && quotient % 2 == 1)
    {
        quotient + 1
    } else {
        quotient
    };
    rounded as u32
}
