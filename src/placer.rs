// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Adaptive text placement
//!
//! A [`Placer`] places one [`TextItem`] at a time. Starting from the item's
//! base size, each attempt measures the text, applies rotation and tries the
//! preferred origin. An item which would leave the canvas is shrunk; an item
//! which overlaps earlier items is relocated (see [`Fallback`]) or shrunk.
//! On success the item is drawn and its rectangle committed; on failure
//! nothing is drawn or committed.
//!
//! Shrinking keeps items which are placed first visually dominant, and
//! bounds the work: at most `(base_size - min_size) / size_step + 1`
//! attempts are made per item.

use crate::fonts::FaceId;
use crate::raster::RenderError;
use crate::search::{find_position, Strategy};
use crate::{
    rotated_size, Config, Fallback, Measure, Occupancy, Point, Rect, Rgb, Size, TextScale,
};
use easy_cast::Cast;
use thiserror::Error;

/// A text item awaiting placement
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    /// Text, in its final (rendered) case
    pub content: String,
    /// Font face
    pub face: FaceId,
    /// Desired top-left origin
    pub preferred: Point,
    /// Font size of the first attempt, in pixels per Em
    pub base_size: u32,
    /// Smallest acceptable font size
    pub min_size: u32,
    /// Vertical stretch factor
    pub stretch: f32,
    /// Counter-clockwise rotation in degrees
    pub rotation: f32,
    pub color: Rgb,
}

impl TextItem {
    /// Construct with defaults: no stretch, no rotation, black
    pub fn new(content: impl Into<String>, face: FaceId, preferred: Point, base_size: u32) -> Self {
        TextItem {
            content: content.into(),
            face,
            preferred,
            base_size,
            min_size: base_size.min(20),
            stretch: 1.0,
            rotation: 0.0,
            color: Rgb::BLACK,
        }
    }

    /// Font sizes to attempt, largest first
    pub fn sizes(&self, step: u32) -> impl Iterator<Item = u32> {
        assert!(step > 0, "TextItem::sizes: zero step");
        let min = self.min_size;
        (min..=self.base_size).rev().step_by(step.cast())
    }
}

/// Destination of placed text
///
/// [`crate::raster::Painter`] draws to a canvas; tests may substitute a type
/// with fixed metrics.
pub trait Paint: Measure {
    /// Draw `item` at `scale` into `rect`
    ///
    /// `rect` was computed from [`Measure::measure`] and
    /// [`crate::rotated_size`]; the drawn size must match.
    fn paint(&mut self, item: &TextItem, scale: TextScale, rect: Rect) -> Result<(), RenderError>;
}

/// A successful placement
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// The committed rectangle
    pub rect: Rect,
    /// Font size used
    pub size: u32,
    /// How the origin was found
    pub strategy: Strategy,
    /// Number of sizes attempted, including the successful one
    pub attempts: u32,
}

/// Placement failure
///
/// These are expected outcomes of layout rather than faults: the poster is
/// still produced, lacking the item.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaceError {
    /// No size in range fits within bounds without overlap
    #[error("no size between {min_size} and {base_size} fits ({attempts} attempts)")]
    Unfittable {
        base_size: u32,
        min_size: u32,
        attempts: u32,
    },
    /// Nothing to draw: empty text, no glyphs or unknown face
    #[error("text is empty or cannot be drawn")]
    Degenerate,
    /// Drawing failed after a position was found
    #[error("render failed")]
    Render(#[from] RenderError),
}

/// The adaptive text placer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placer {
    pub canvas: Size,
    pub margin: u32,
    pub size_step: u32,
    pub fallback: Fallback,
}

impl Placer {
    /// Construct from configuration
    ///
    /// Panics if the configuration is invalid (see [`Config::validate`]).
    pub fn new(config: &Config) -> Self {
        config.validate();
        Placer {
            canvas: config.canvas,
            margin: config.margin,
            size_step: config.size_step,
            fallback: config.fallback,
        }
    }

    /// Place `item`, drawing it with `painter` and committing to `occupancy`
    ///
    /// Panics if `item.min_size > item.base_size`.
    pub fn place<P: Paint>(
        &self,
        item: &TextItem,
        occupancy: &mut Occupancy,
        painter: &mut P,
    ) -> Result<Placement, PlaceError> {
        assert!(
            item.min_size <= item.base_size,
            "TextItem: min_size {} exceeds base_size {}",
            item.min_size,
            item.base_size
        );
        if item.content.trim().is_empty() {
            return Err(PlaceError::Degenerate);
        }

        let mut attempts = 0;
        let mut measured_any = false;
        for size in item.sizes(self.size_step) {
            attempts += 1;
            let scale = TextScale::new(size, item.stretch);
            let Some(upright) = painter.measure(&item.content, item.face, scale) else {
                continue;
            };
            measured_any = true;
            let bbox = rotated_size(upright, item.rotation);

            let Some((origin, strategy)) = self.position(bbox, item.preferred, occupancy) else {
                log::trace!("place {:?}: size {size} ({bbox:?}) does not fit", item.content);
                continue;
            };

            let rect = Rect::from_origin(origin, bbox);
            painter.paint(item, scale, rect)?;
            occupancy.commit(rect);
            log::debug!(
                "place {:?}: size {size} at {rect:?} via {strategy:?} after {attempts} attempts",
                item.content
            );
            return Ok(Placement {
                rect,
                size,
                strategy,
                attempts,
            });
        }

        if !measured_any {
            return Err(PlaceError::Degenerate);
        }
        Err(PlaceError::Unfittable {
            base_size: item.base_size,
            min_size: item.min_size,
            attempts,
        })
    }

    /// Find an origin for an item of size `bbox`, if any is acceptable
    fn position(
        &self,
        bbox: Size,
        preferred: Point,
        occupancy: &Occupancy,
    ) -> Option<(Point, Strategy)> {
        let rect = Rect::from_origin(preferred, bbox);
        if !Occupancy::in_bounds(&rect, self.canvas, self.margin) {
            return None;
        }
        if !occupancy.overlaps(&rect, self.margin) {
            return Some((preferred, Strategy::Preferred));
        }
        match self.fallback {
            Fallback::Shrink => None,
            Fallback::Relocate => {
                let proposal = find_position(bbox, preferred, occupancy, self.canvas, self.margin);
                // A clamped proposal may overlap: shrink instead
                proposal
                    .is_valid()
                    .then_some((proposal.origin, proposal.strategy))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::ceil_px;

    /// Fixed-advance metrics: each char is `3/5 × size` wide, lines are
    /// `size × stretch` high
    struct Mono {
        painted: Vec<(String, u32, Rect)>,
        fail_paint: bool,
    }

    impl Mono {
        fn new() -> Self {
            Mono {
                painted: vec![],
                fail_paint: false,
            }
        }
    }

    impl Measure for Mono {
        fn measure(&self, text: &str, _: FaceId, scale: TextScale) -> Option<Size> {
            let n = text.chars().count() as u32;
            let dpem = scale.dpem as u32;
            let size = Size(n * dpem * 3 / 5, ceil_px(scale.dpem * scale.stretch));
            (!size.is_empty()).then_some(size)
        }
    }

    impl Paint for Mono {
        fn paint(&mut self, item: &TextItem, scale: TextScale, rect: Rect) -> Result<(), RenderError> {
            if self.fail_paint {
                return Err(RenderError::NoGlyphs);
            }
            self.painted.push((item.content.clone(), scale.dpem as u32, rect));
            Ok(())
        }
    }

    fn placer(fallback: Fallback) -> Placer {
        Placer::new(&Config::default().with_fallback(fallback))
    }

    fn item(text: &str, at: Point, base: u32) -> TextItem {
        TextItem::new(text, FaceId::default(), at, base)
    }

    #[test]
    fn sizes_descend_in_steps() {
        let mut it = item("X", Point(0, 0), 42);
        it.min_size = 30;
        assert_eq!(it.sizes(5).collect::<Vec<_>>(), vec![42, 37, 32]);
        it.min_size = 42;
        assert_eq!(it.sizes(5).collect::<Vec<_>>(), vec![42]);
    }

    #[test]
    fn fits_at_base_size() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let p = placer(Fallback::Relocate)
            .place(&item("HI", Point(50, 50), 100), &mut occ, &mut painter)
            .unwrap();
        assert_eq!(p.size, 100);
        assert_eq!(p.rect, Rect::new(50, 50, 170, 150));
        assert_eq!(p.strategy, Strategy::Preferred);
        assert_eq!(p.attempts, 1);
        assert_eq!(occ.rects(), &[p.rect]);
        assert_eq!(painter.painted.len(), 1);
    }

    #[test]
    fn shrinks_to_fit_width() {
        // "GALA NIGHT" is 10 chars: width = 6 × size. With margin 20 the
        // right edge may reach 1060, thus 50 + 6 × size <= 1060 → size <= 168.
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let mut it = item("GALA NIGHT", Point(50, 50), 220);
        it.min_size = 20;
        let p = placer(Fallback::Relocate)
            .place(&it, &mut occ, &mut painter)
            .unwrap();
        assert_eq!(p.size, 165);
        assert_eq!(p.rect.origin(), Point(50, 50));
        assert_eq!(p.strategy, Strategy::Preferred);
        assert_eq!(p.attempts, 12);
    }

    #[test]
    fn rotation_enlarges_bbox() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let mut it = item("ABCDE", Point(100, 100), 40);
        it.rotation = 90.0;
        let p = placer(Fallback::Relocate)
            .place(&it, &mut occ, &mut painter)
            .unwrap();
        assert_eq!(p.rect, Rect::new(100, 100, 140, 220));
    }

    #[test]
    fn unfittable_commits_nothing() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        occ.commit(Rect::new(500, 500, 600, 600));
        let before = occ.clone();
        let mut it = item(&"W".repeat(200), Point(30, 30), 100);
        it.min_size = 20;
        let err = placer(Fallback::Relocate)
            .place(&it, &mut occ, &mut painter)
            .unwrap_err();
        assert_eq!(
            err,
            PlaceError::Unfittable {
                base_size: 100,
                min_size: 20,
                attempts: 17
            }
        );
        assert_eq!(occ, before);
        assert!(painter.painted.is_empty());
    }

    #[test]
    fn empty_text_is_degenerate() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let err = placer(Fallback::Relocate)
            .place(&item("  ", Point(30, 30), 100), &mut occ, &mut painter)
            .unwrap_err();
        assert_eq!(err, PlaceError::Degenerate);
        assert!(occ.is_empty());
    }

    #[test]
    fn render_failure_commits_nothing() {
        let mut painter = Mono::new();
        painter.fail_paint = true;
        let mut occ = Occupancy::new();
        let err = placer(Fallback::Relocate)
            .place(&item("OK", Point(30, 30), 50), &mut occ, &mut painter)
            .unwrap_err();
        assert_eq!(err, PlaceError::Render(RenderError::NoGlyphs));
        assert!(occ.is_empty());
    }

    #[test]
    fn relocate_moves_second_item() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let placer = placer(Fallback::Relocate);
        let a = placer
            .place(&item("SAME", Point(100, 100), 60), &mut occ, &mut painter)
            .unwrap();
        let b = placer
            .place(&item("SAME", Point(100, 100), 60), &mut occ, &mut painter)
            .unwrap();
        assert_eq!(a.rect.origin(), Point(100, 100));
        assert_eq!(b.strategy, Strategy::Spiral);
        assert_eq!(b.size, 60);
        assert!(!b.rect.expand(20).intersects(&a.rect));
        assert_eq!(occ.rects(), &[a.rect, b.rect]);
    }

    #[test]
    fn shrink_keeps_origin() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        // An obstacle below the preferred origin: only a shorter item fits
        occ.commit(Rect::new(0, 200, 1080, 300));
        let p = placer(Fallback::Shrink)
            .place(&item("LOW", Point(100, 100), 100), &mut occ, &mut painter)
            .unwrap();
        assert_eq!(p.rect.origin(), Point(100, 100));
        assert_eq!(p.strategy, Strategy::Preferred);
        // 100 + size + 20 <= 200
        assert_eq!(p.size, 80);
    }

    #[test]
    fn far_origin_is_unfittable() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        let mut it = item("EDGE", Point(i32::MAX - 10, 100), 40);
        it.min_size = 20;
        let err = placer(Fallback::Relocate)
            .place(&it, &mut occ, &mut painter)
            .unwrap_err();
        assert!(matches!(err, PlaceError::Unfittable { .. }), "{err:?}");
        assert!(occ.is_empty());
    }

    #[test]
    fn attempts_are_bounded() {
        let mut painter = Mono::new();
        let mut occ = Occupancy::new();
        occ.commit(Rect::new(0, 0, 1080, 1350));
        let mut it = item("X", Point(100, 100), 99);
        it.min_size = 20;
        let Err(PlaceError::Unfittable { attempts, .. }) =
            placer(Fallback::Relocate).place(&it, &mut occ, &mut painter)
        else {
            panic!("expected Unfittable");
        };
        assert_eq!(attempts, (99 - 20) / 5 + 1);
    }
}
