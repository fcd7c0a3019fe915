// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Poster library — simple data types

use crate::conv::to_i32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size in whole pixels: `(width, height)`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size(pub u32, pub u32);

impl Size {
    /// True if either dimension is zero
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0 || self.1 == 0
    }
}

/// A canvas coordinate: `(x, y)`
///
/// Coordinates may be negative (e.g. search candidates left of the canvas).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub i32, pub i32);

/// An axis-aligned rectangle in canvas pixels
///
/// The start coordinates `(x1, y1)` are inclusive and the end coordinates
/// `(x2, y2)` exclusive; thus a rectangle covers `x2 - x1` columns.
/// It is required that `x1 <= x2` and `y1 <= y2`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Construct from corners
    ///
    /// Panics (in debug builds) if the corners are not ordered.
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "Rect: unordered corners");
        Rect { x1, y1, x2, y2 }
    }

    /// Construct from an origin (top-left) and a size
    ///
    /// The far corner saturates at `i32::MAX`.
    #[inline]
    pub fn from_origin(origin: Point, size: Size) -> Self {
        let (w, h) = (to_i32(size.0), to_i32(size.1));
        let x2 = origin.0.saturating_add(w);
        let y2 = origin.1.saturating_add(h);
        Rect::new(origin.0, origin.1, x2, y2)
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Point {
        Point(self.x1, self.y1)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Grow by `m` on all sides
    #[inline]
    pub fn expand(&self, m: i32) -> Self {
        Rect {
            x1: self.x1.saturating_sub(m),
            y1: self.y1.saturating_sub(m),
            x2: self.x2.saturating_add(m),
            y2: self.y2.saturating_add(m),
        }
    }

    /// True if the interiors of `self` and `other` share at least one pixel
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// An opaque RGB colour
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Relative luminance as defined by WCAG 2
    pub fn luminance(self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = f32::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }

    /// WCAG contrast ratio between two colours, in the range `1.0..=21.0`
    pub fn contrast(self, other: Rgb) -> f32 {
        let (a, b) = (self.luminance(), other.luminance());
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }

    /// Convert to an `image` pixel with the given alpha
    #[inline]
    pub fn with_alpha(self, a: u8) -> image::Rgba<u8> {
        image::Rgba([self.0, self.1, self.2, a])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}
