// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Placement search
//!
//! Given the size of an item and a preferred origin, [`find_position`]
//! proposes an origin at which the item lies within the canvas and does not
//! overlap anything already placed. Strategies are tried in order; the first
//! to yield a valid origin wins:
//!
//! 1.  [`Strategy::Preferred`]: the preferred origin itself
//! 2.  [`Strategy::Spiral`]: rings of increasing radius around the preferred
//!     origin
//! 3.  [`Strategy::Grid`]: a coarse row-major scan of the whole canvas
//! 4.  [`Strategy::Clamped`]: the preferred origin clamped into bounds, which
//!     may overlap existing items
//!
//! The search is deterministic and never modifies the [`Occupancy`] set.

use crate::conv::{nearest_px, to_i32};
use crate::{Occupancy, Point, Rect, Size};
use easy_cast::{Cast, Conv};

/// Radius of the first spiral ring
pub const SPIRAL_START: i32 = 50;
/// Radius increment between spiral rings
pub const SPIRAL_STEP: i32 = 30;
/// Angle increment (degrees) around each spiral ring
pub const SPIRAL_ANGLE_STEP: u32 = 15;
/// Grid stride of the last-chance scan
pub const GRID_STRIDE: usize = 100;

/// Strategy which yielded a [`Proposal`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Preferred,
    Spiral,
    Grid,
    /// The preferred origin clamped into bounds
    ///
    /// This is a near-failure: the proposed rectangle may overlap committed
    /// items and (if larger than the usable area) may exceed bounds.
    Clamped,
}

/// A proposed origin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub origin: Point,
    pub strategy: Strategy,
}

impl Proposal {
    /// True unless this is a [`Strategy::Clamped`] fallback
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.strategy != Strategy::Clamped
    }
}

struct Search<'a> {
    size: Size,
    preferred: Point,
    occupancy: &'a Occupancy,
    canvas: Size,
    margin: u32,
}

impl<'a> Search<'a> {
    fn accepts(&self, origin: Point) -> bool {
        let rect = Rect::from_origin(origin, self.size);
        Occupancy::in_bounds(&rect, self.canvas, self.margin)
            && !self.occupancy.overlaps(&rect, self.margin)
    }

    fn preferred(&self) -> Option<Point> {
        Some(self.preferred).filter(|p| self.accepts(*p))
    }

    fn spiral(&self) -> Option<Point> {
        let limit = to_i32(self.canvas.0.min(self.canvas.1)) / 2;
        let Point(px, py) = self.preferred;
        for r in (SPIRAL_START..limit).step_by(SPIRAL_STEP.cast()) {
            for deg in (0..360).step_by(SPIRAL_ANGLE_STEP.cast()) {
                let (sin, cos) = f32::conv(deg).to_radians().sin_cos();
                let r = f32::conv(r);
                let p = Point(
                    px.saturating_add(nearest_px(r * cos)),
                    py.saturating_add(nearest_px(r * sin)),
                );
                if self.accepts(p) {
                    return Some(p);
                }
            }
        }
        None
    }

    fn grid(&self) -> Option<Point> {
        let m = to_i32(self.margin);
        let x_end = to_i32(self.canvas.0) - m - to_i32(self.size.0);
        let y_end = to_i32(self.canvas.1) - m - to_i32(self.size.1);
        for y in (m..=y_end).step_by(GRID_STRIDE) {
            for x in (m..=x_end).step_by(GRID_STRIDE) {
                let p = Point(x, y);
                if self.accepts(p) {
                    return Some(p);
                }
            }
        }
        None
    }

    fn clamped(&self) -> Point {
        let m = to_i32(self.margin);
        let x_max = (to_i32(self.canvas.0) - m - to_i32(self.size.0)).max(m);
        let y_max = (to_i32(self.canvas.1) - m - to_i32(self.size.1)).max(m);
        Point(
            self.preferred.0.clamp(m, x_max),
            self.preferred.1.clamp(m, y_max),
        )
    }
}

/// Propose an origin for an item of the given `size`
///
/// See the [module documentation](self). The result is tagged with the
/// [`Strategy`] which produced it; callers wishing to preserve the
/// no-overlap invariant must reject [`Strategy::Clamped`] proposals.
pub fn find_position(
    size: Size,
    preferred: Point,
    occupancy: &Occupancy,
    canvas: Size,
    margin: u32,
) -> Proposal {
    let search = Search {
        size,
        preferred,
        occupancy,
        canvas,
        margin,
    };

    let found = search
        .preferred()
        .map(|p| (p, Strategy::Preferred))
        .or_else(|| search.spiral().map(|p| (p, Strategy::Spiral)))
        .or_else(|| search.grid().map(|p| (p, Strategy::Grid)));
    if let Some((origin, strategy)) = found {
        log::trace!("find_position: {strategy:?} → {origin:?}");
        return Proposal { origin, strategy };
    }

    let origin = search.clamped();
    log::debug!("find_position: no valid position for {size:?}; clamped to {origin:?}");
    Proposal {
        origin,
        strategy: Strategy::Clamped,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CANVAS: Size = Size(1080, 1350);

    #[test]
    fn preferred_when_free() {
        let occ = Occupancy::new();
        let p = find_position(Size(200, 80), Point(100, 100), &occ, CANVAS, 20);
        assert_eq!(p.origin, Point(100, 100));
        assert_eq!(p.strategy, Strategy::Preferred);
    }

    #[test]
    fn spiral_around_obstacle() {
        let mut occ = Occupancy::new();
        let size = Size(200, 80);
        occ.commit(Rect::from_origin(Point(100, 100), size));
        let p = find_position(size, Point(100, 100), &occ, CANVAS, 20);
        assert_eq!(p.strategy, Strategy::Spiral);
        let rect = Rect::from_origin(p.origin, size);
        assert!(!occ.overlaps(&rect, 20));
        assert!(Occupancy::in_bounds(&rect, CANVAS, 20));
    }

    #[test]
    fn spiral_first_ring_order() {
        // With nothing placed but the preferred origin out of bounds, the
        // first in-bounds point of the first ring is at 0°.
        let occ = Occupancy::new();
        let p = find_position(Size(100, 100), Point(0, 100), &occ, CANVAS, 20);
        assert_eq!(p.strategy, Strategy::Spiral);
        assert_eq!(p.origin, Point(50, 100));
    }

    #[test]
    fn grid_when_spiral_exhausted() {
        // Block the whole top half; the spiral (radius < 540) from the top
        // corner cannot reach the free bottom area but the grid can.
        let mut occ = Occupancy::new();
        occ.commit(Rect::new(0, 0, 1080, 700));
        let p = find_position(Size(100, 50), Point(20, 20), &occ, CANVAS, 20);
        assert_eq!(p.strategy, Strategy::Grid);
        assert_eq!(p.origin, Point(20, 720));
    }

    #[test]
    fn clamped_when_full() {
        let mut occ = Occupancy::new();
        occ.commit(Rect::new(0, 0, 1080, 1350));
        let p = find_position(Size(100, 50), Point(2000, -40), &occ, CANVAS, 20);
        assert!(!p.is_valid());
        assert_eq!(p.origin, Point(1080 - 20 - 100, 20));
    }

    #[test]
    fn clamped_oversized() {
        let occ = Occupancy::new();
        let p = find_position(Size(5000, 50), Point(300, 300), &occ, CANVAS, 20);
        assert_eq!(p.strategy, Strategy::Clamped);
        assert_eq!(p.origin, Point(20, 300));
    }

    #[test]
    fn extreme_preferred_origin() {
        let occ = Occupancy::new();
        let p = find_position(Size(100, 50), Point(i32::MAX - 10, 100), &occ, CANVAS, 20);
        assert_eq!(p.strategy, Strategy::Grid);
        assert_eq!(p.origin, Point(20, 20));
    }

    #[test]
    fn deterministic() {
        let mut occ = Occupancy::new();
        occ.commit(Rect::new(80, 80, 600, 400));
        let a = find_position(Size(300, 90), Point(120, 120), &occ, CANVAS, 20);
        let b = find_position(Size(300, 90), Point(120, 120), &occ, CANVAS, 20);
        assert_eq!(a, b);
    }
}
