// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Occupancy tracking

use crate::conv::to_i32;
use crate::{Rect, Size};
use smallvec::SmallVec;

/// The set of rectangles claimed on a canvas
///
/// This is append-only: its lifetime is a single layout pass. A poster holds
/// only a few items, thus the set usually does not allocate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Occupancy {
    rects: SmallVec<[Rect; 4]>,
}

impl Occupancy {
    /// Construct an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `rect`, expanded by `margin` on all sides, intersects any
    /// committed rectangle
    ///
    /// Two rectangles are thus considered apart only when separated by at
    /// least `margin` pixels horizontally or vertically.
    pub fn overlaps(&self, rect: &Rect, margin: u32) -> bool {
        let expanded = rect.expand(to_i32(margin));
        self.rects.iter().any(|r| expanded.intersects(r))
    }

    /// Claim `rect`
    ///
    /// No merging or validation is done; callers must check
    /// [`Self::overlaps`] and [`Self::in_bounds`] first.
    pub fn commit(&mut self, rect: Rect) {
        log::trace!("Occupancy::commit: {rect:?}");
        self.rects.push(rect);
    }

    /// True if `rect` lies within `[margin, w - margin) × [margin, h - margin)`
    pub fn in_bounds(rect: &Rect, canvas: Size, margin: u32) -> bool {
        let m = to_i32(margin);
        let (w, h) = (to_i32(canvas.0), to_i32(canvas.1));
        rect.x1 >= m && rect.y1 >= m && rect.x2 <= w - m && rect.y2 <= h - m
    }

    /// Committed rectangles, in order of commitment
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of committed rectangles
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// True if nothing is committed
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
