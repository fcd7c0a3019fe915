// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Pixel dimensions are `u32` (as used by `image`) while canvas coordinates
//! are `i32`, since search candidates may lie left of or above the canvas.

use easy_cast::{Cast, ConvFloat};

/// Convert `u32` → `i32`
///
/// Panics (on debug builds) if the value is not representable.
#[inline]
pub fn to_i32(x: u32) -> i32 {
    x.cast()
}

/// Convert a non-negative `i32` → `u32`
#[inline]
pub fn to_u32(x: i32) -> u32 {
    x.cast()
}

/// Round a floating-point pixel length up to a whole number of pixels
///
/// Negative and non-finite input results in zero.
#[inline]
pub fn ceil_px(x: f32) -> u32 {
    if x.is_finite() && x > 0.0 {
        u32::conv_ceil(x)
    } else {
        0
    }
}

/// Round a floating-point coordinate to the nearest pixel
#[inline]
pub fn nearest_px(x: f32) -> i32 {
    i32::conv_nearest(x)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ceil() {
        assert_eq!(ceil_px(0.0), 0);
        assert_eq!(ceil_px(-3.5), 0);
        assert_eq!(ceil_px(f32::NAN), 0);
        assert_eq!(ceil_px(9.01), 10);
        assert_eq!(ceil_px(10.0), 10);
    }

    #[test]
    fn nearest() {
        assert_eq!(nearest_px(-0.6), -1);
        assert_eq!(nearest_px(49.5), 50);
    }
}
