// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Background shape motifs
//!
//! A shape is painted onto the canvas before any text, thus text always
//! appears above it. Shapes do not take part in occupancy tracking.

use crate::conv::to_i32;
use crate::palette::Palette;
use crate::rng::Rng;
use crate::{Canvas, Rect, Rgb, Size};
use easy_cast::{Conv, ConvFloat};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named shape motif
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Circle,
    Leaf,
    Heart,
    Rectangle,
    Line,
}

/// Keywords (matched within a lower-cased location) and their motif
const LOCATION_SHAPES: &[(&str, Shape)] = &[
    ("park", Shape::Leaf),
    ("garden", Shape::Leaf),
    ("beach", Shape::Circle),
    ("hall", Shape::Rectangle),
    ("stadium", Shape::Circle),
    ("chapel", Shape::Heart),
    ("wedding", Shape::Heart),
    ("street", Shape::Line),
    ("avenue", Shape::Line),
    ("track", Shape::Line),
];

impl Shape {
    /// Choose a motif suggested by a location, if any
    ///
    /// The first matching keyword wins.
    pub fn from_location(location: &str) -> Option<Shape> {
        let location = location.to_lowercase();
        LOCATION_SHAPES
            .iter()
            .find(|(key, _)| location.contains(key))
            .map(|(_, shape)| *shape)
    }
}

/// Paints shape motifs
pub trait ShapeRenderer {
    /// Draw `shape`, or a random shape if `None`
    ///
    /// Colours are taken from `palette`'s accents.
    fn draw(&self, shape: Option<Shape>, palette: &Palette, canvas: &mut Canvas, rng: &mut Rng);
}

/// Simple filled shapes
///
/// Named shapes are centred on the canvas; random shapes are placed
/// anywhere (and may be partially clipped).
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicShapes;

impl BasicShapes {
    fn color(palette: &Palette, rng: &mut Rng) -> Rgb {
        rng.choose(palette.accents())
            .copied()
            .unwrap_or_else(|| palette.background())
    }

    fn random(canvas: &mut Canvas, color: Rgb, rng: &mut Rng) {
        let Size(w, h) = canvas.size();
        let (w, h) = (to_i32(w), to_i32(h));
        match rng.range(0, 2) {
            0 => {
                let r = rng.range_i32(50, 300);
                let (x, y) = (rng.range_i32(0, w), rng.range_i32(0, h));
                log::trace!("BasicShapes: circle r={r} at ({x}, {y})");
                fill_ellipse(canvas, (x, y), (r, r), color);
            }
            1 => {
                let (x1, y1) = (rng.range_i32(0, w), rng.range_i32(0, h));
                let (x2, y2) = (rng.range_i32(x1, w), rng.range_i32(y1, h));
                log::trace!("BasicShapes: rectangle ({x1}, {y1}) to ({x2}, {y2})");
                canvas.fill_rect(Rect::new(x1, y1, x2, y2), color);
            }
            _ => {
                let a = (rng.range_i32(0, w), rng.range_i32(0, h));
                let b = (rng.range_i32(0, w), rng.range_i32(0, h));
                let width = rng.range(5, 20);
                log::trace!("BasicShapes: line {a:?} to {b:?}, width {width}");
                fill_line(canvas, a, b, width, color);
            }
        }
    }
}

impl ShapeRenderer for BasicShapes {
    fn draw(&self, shape: Option<Shape>, palette: &Palette, canvas: &mut Canvas, rng: &mut Rng) {
        let color = Self::color(palette, rng);
        let Size(w, h) = canvas.size();
        let centre = (to_i32(w / 2), to_i32(h / 2));
        match shape {
            None => Self::random(canvas, color, rng),
            Some(Shape::Circle) => fill_ellipse(canvas, centre, (200, 200), color),
            Some(Shape::Leaf) => fill_ellipse(canvas, centre, (120, 60), color),
            Some(Shape::Heart) => fill_heart(canvas, centre, 150, color),
            Some(Shape::Rectangle) => {
                let (hw, hh) = (to_i32(w / 4), to_i32(h / 8));
                let rect = Rect::new(centre.0 - hw, centre.1 - hh, centre.0 + hw, centre.1 + hh);
                canvas.fill_rect(rect, color);
            }
            Some(Shape::Line) => {
                let y = centre.1;
                fill_line(canvas, (0, y), (to_i32(w), y), 12, color);
            }
        }
    }
}

/// Fill an axis-aligned ellipse with the given centre and radii
pub fn fill_ellipse(canvas: &mut Canvas, centre: (i32, i32), radii: (i32, i32), color: Rgb) {
    let (cx, cy) = centre;
    let (rx, ry) = radii;
    if rx <= 0 || ry <= 0 {
        return;
    }
    let bounds = Rect::new(cx - rx, cy - ry, cx + rx, cy + ry);
    let (fcx, fcy) = (f32::conv(cx), f32::conv(cy));
    let (frx, fry) = (f32::conv(rx), f32::conv(ry));
    canvas.fill_where(bounds, color, |x, y| {
        let (dx, dy) = ((x - fcx) / frx, (y - fcy) / fry);
        dx * dx + dy * dy <= 1.0
    });
}

/// Fill a heart of approximately `radius` centred on `centre`
///
/// Uses the implicit curve `(x² + y² − 1)³ − x²y³ ≤ 0`, flipped so the
/// point faces down.
pub fn fill_heart(canvas: &mut Canvas, centre: (i32, i32), radius: i32, color: Rgb) {
    if radius <= 0 {
        return;
    }
    let (cx, cy) = centre;
    let bounds = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius);
    let (fcx, fcy) = (f32::conv(cx), f32::conv(cy));
    // The curve spans roughly [-1.14, 1.14] × [-1, 1.25]
    let scale = f32::conv(radius) / 1.2;
    canvas.fill_where(bounds, color, |x, y| {
        let u = (x - fcx) / scale;
        let v = (fcy - y) / scale + 0.1;
        let q = u * u + v * v - 1.0;
        q * q * q - u * u * v * v * v <= 0.0
    });
}

/// Fill a line segment of the given width with round ends
pub fn fill_line(canvas: &mut Canvas, a: (i32, i32), b: (i32, i32), width: u32, color: Rgb) {
    let half = f32::conv(width) / 2.0;
    let pad = i32::conv_ceil(half);
    let bounds = Rect::new(
        a.0.min(b.0) - pad,
        a.1.min(b.1) - pad,
        a.0.max(b.0) + pad + 1,
        a.1.max(b.1) + pad + 1,
    );
    let (ax, ay) = (f32::conv(a.0), f32::conv(a.1));
    let (dx, dy) = (f32::conv(b.0) - ax, f32::conv(b.1) - ay);
    let len2 = dx * dx + dy * dy;
    canvas.fill_where(bounds, color, |x, y| {
        let (px, py) = (x - ax, y - ay);
        let t = if len2 > 0.0 {
            ((px * dx + py * dy) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (ex, ey) = (px - t * dx, py - t * dy);
        ex * ex + ey * ey <= half * half
    });
}

/// Count pixels of `color`; used by tests
#[cfg(test)]
pub(crate) fn count(canvas: &Canvas, color: Rgb) -> u32 {
    let Size(w, h) = canvas.size();
    let mut n = 0;
    for y in 0..h {
        for x in 0..w {
            if canvas.pixel(x, y) == color {
                n += 1;
            }
        }
    }
    n
}

#[cfg(test)]
mod test {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);

    #[test]
    fn location_keywords() {
        assert_eq!(Shape::from_location("the Park"), Some(Shape::Leaf));
        assert_eq!(Shape::from_location("City Hall"), Some(Shape::Rectangle));
        assert_eq!(Shape::from_location("Bondi beach"), Some(Shape::Circle));
        assert_eq!(Shape::from_location("St Mary's Chapel"), Some(Shape::Heart));
        assert_eq!(Shape::from_location("Main Street"), Some(Shape::Line));
        assert_eq!(Shape::from_location("the running track"), Some(Shape::Line));
        assert_eq!(Shape::from_location("downtown"), None);
    }

    #[test]
    fn circle_is_centred() {
        let mut canvas = Canvas::new(Size(1080, 1350), Rgb::WHITE);
        let palette = Palette::new([Rgb::WHITE, RED]);
        BasicShapes.draw(Some(Shape::Circle), &palette, &mut canvas, &mut Rng::new(0));
        assert_eq!(canvas.pixel(540, 675), RED);
        assert_eq!(canvas.pixel(540 + 195, 675), RED);
        assert_eq!(canvas.pixel(540 + 205, 675), Rgb::WHITE);
        assert_eq!(canvas.pixel(0, 0), Rgb::WHITE);
        // area ≈ π r²
        let area = f32::conv(count(&canvas, RED));
        assert!((area / (std::f32::consts::PI * 40000.0) - 1.0).abs() < 0.01);
    }

    #[test]
    fn leaf_is_wide() {
        let mut canvas = Canvas::new(Size(600, 600), Rgb::WHITE);
        let palette = Palette::new([Rgb::WHITE, RED]);
        BasicShapes.draw(Some(Shape::Leaf), &palette, &mut canvas, &mut Rng::new(0));
        assert_eq!(canvas.pixel(300 + 110, 300), RED);
        assert_eq!(canvas.pixel(300, 300 + 70), Rgb::WHITE);
    }

    #[test]
    fn heart_has_lobes_and_point() {
        let mut canvas = Canvas::new(Size(400, 400), Rgb::WHITE);
        fill_heart(&mut canvas, (200, 200), 150, RED);
        assert_eq!(canvas.pixel(200, 200), RED);
        // notch between the lobes is above the widest part
        assert_eq!(canvas.pixel(200, 200 - 140), Rgb::WHITE);
        assert_eq!(canvas.pixel(200 - 60, 200 - 100), RED);
        // point at the bottom
        assert_eq!(canvas.pixel(200, 200 + 100), RED);
        assert_eq!(canvas.pixel(200 - 100, 200 + 100), Rgb::WHITE);
    }

    #[test]
    fn line_width() {
        let mut canvas = Canvas::new(Size(100, 100), Rgb::WHITE);
        fill_line(&mut canvas, (10, 50), (90, 50), 10, RED);
        assert_eq!(canvas.pixel(50, 46), RED);
        assert_eq!(canvas.pixel(50, 54), RED);
        assert_eq!(canvas.pixel(50, 56), Rgb::WHITE);
        assert_eq!(canvas.pixel(6, 50), RED);
        assert_eq!(canvas.pixel(3, 50), Rgb::WHITE);
    }

    #[test]
    fn random_shape_is_deterministic() {
        let palette = Palette::new([Rgb::WHITE, RED, Rgb::BLACK]);
        let draw = |seed| {
            let mut canvas = Canvas::new(Size(300, 300), Rgb::WHITE);
            BasicShapes.draw(None, &palette, &mut canvas, &mut Rng::new(seed));
            canvas.into_image()
        };
        assert_eq!(draw(11), draw(11));
    }
}
