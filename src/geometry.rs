// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Bounding boxes under rotation

use crate::conv::ceil_px;
use crate::Size;
use easy_cast::Conv;

/// Axis-aligned bounding box of a `w × h` box rotated by `degrees`
///
/// The result does not depend on the sign of the angle. For `degrees == 0`
/// the input is returned unchanged.
pub fn rotated_bbox(w: f32, h: f32, degrees: f32) -> (f32, f32) {
    if degrees == 0.0 {
        return (w, h);
    }
    let (sin, cos) = degrees.abs().to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    (w * cos + h * sin, w * sin + h * cos)
}

/// As [`rotated_bbox`], rounded up to whole pixels
///
/// Both layout and rastering use this, thus a committed rectangle always
/// has the size of the drawn surface.
pub fn rotated_size(size: Size, degrees: f32) -> Size {
    if degrees == 0.0 {
        return size;
    }
    let (w, h) = rotated_bbox(f32::conv(size.0), f32::conv(size.1), degrees);
    // Guard against results like 100.00001 for right angles
    Size(ceil_px(w - 1e-3), ceil_px(h - 1e-3))
}
