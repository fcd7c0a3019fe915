// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Support for rastering text
//!
//! Text is laid out on a single line by [`TextRun::layout`]; the same run is
//! used for measurement and drawing. Drawing happens on a scratch
//! [`Surface`] holding only coverage (alpha) for a single colour. A surface
//! may be rotated, then composited onto the [`Canvas`]; it is dropped once
//! composited.
//!
//! Since a surface has a single colour, rotation interpolates coverage alone
//! and never blends glyph colour with a background, thus rotated edges stay
//! clean.

use crate::conv::ceil_px;
use crate::fonts::{FaceId, FaceStore, FontLibrary};
use crate::placer::{Paint, TextItem};
use crate::{rotated_size, Canvas, Measure, Point, Rect, Rgb, Size, TextScale};
use ab_glyph::{Font, OutlinedGlyph, ScaleFont};
use easy_cast::{Cast, Conv, ConvFloat};
use image::RgbaImage;
use thiserror::Error;

/// Text rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("unknown font face: {0:?}")]
    UnknownFace(FaceId),
    #[error("text has no drawable glyphs")]
    NoGlyphs,
    #[error("drawn size {found:?} does not match placement {expected:?}")]
    SizeMismatch { expected: Size, found: Size },
}

/// A line of outlined glyphs
///
/// Glyphs are positioned from a caret starting at the origin with the
/// baseline at the font's ascent. No kerning or shaping is applied.
pub struct TextRun {
    glyphs: Vec<OutlinedGlyph>,
    /// Top-left of the inked area
    min: ab_glyph::Point,
    size: Size,
}

impl TextRun {
    /// Lay out `text`
    ///
    /// Control characters are skipped. Returns `None` if nothing would be
    /// drawn.
    pub fn layout(store: &FaceStore, text: &str, scale: TextScale) -> Option<Self> {
        if !scale.is_valid() {
            return None;
        }
        let font = store.ab_glyph();
        let scaled = font.as_scaled(store.px_scale(scale.dpem, scale.stretch));

        let mut caret = ab_glyph::point(0.0, scaled.ascent());
        let mut glyphs = Vec::with_capacity(text.len());
        let mut bounds: Option<ab_glyph::Rect> = None;
        for c in text.chars().filter(|c| !c.is_control()) {
            let mut glyph = scaled.scaled_glyph(c);
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);

            if let Some(outline) = font.outline_glyph(glyph) {
                let b = outline.px_bounds();
                bounds = Some(match bounds {
                    None => b,
                    Some(u) => ab_glyph::Rect {
                        min: ab_glyph::point(u.min.x.min(b.min.x), u.min.y.min(b.min.y)),
                        max: ab_glyph::point(u.max.x.max(b.max.x), u.max.y.max(b.max.y)),
                    },
                });
                glyphs.push(outline);
            }
        }

        let bounds = bounds?;
        let size = Size(
            ceil_px(bounds.max.x - bounds.min.x),
            ceil_px(bounds.max.y - bounds.min.y),
        );
        if size.is_empty() {
            return None;
        }
        Some(TextRun {
            glyphs,
            min: bounds.min,
            size,
        })
    }

    /// Size of the inked area
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Draw onto a new scratch surface of exactly [`Self::size`]
    pub fn draw(&self, color: Rgb) -> Surface {
        let mut image = RgbaImage::from_pixel(self.size.0, self.size.1, color.with_alpha(0));
        for glyph in &self.glyphs {
            let b = glyph.px_bounds();
            // px_bounds are whole pixels, thus these offsets are exact
            let ox = u32::conv_nearest(b.min.x - self.min.x);
            let oy = u32::conv_nearest(b.min.y - self.min.y);
            glyph.draw(|x, y, c| {
                let (x, y) = (ox + x, oy + y);
                if x < self.size.0 && y < self.size.1 {
                    let a = u8::conv_nearest(c.clamp(0.0, 1.0) * 255.0);
                    let px = image.get_pixel_mut(x, y);
                    px.0[3] = px.0[3].max(a);
                }
            });
        }
        Surface { image, color }
    }
}

/// A scratch surface holding coverage of a single colour
///
/// Surfaces are temporary: create one per item, composite, drop.
pub struct Surface {
    image: RgbaImage,
    color: Rgb,
}

impl Surface {
    /// Size in pixels
    #[inline]
    pub fn size(&self) -> Size {
        Size(self.image.width(), self.image.height())
    }

    /// Read coverage at `(x, y)`; zero outside the surface
    #[inline]
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        let (x, y): (u32, u32) = (x.cast(), y.cast());
        if x < self.image.width() && y < self.image.height() {
            self.image.get_pixel(x, y).0[3]
        } else {
            0
        }
    }

    fn sample(&self, x: f32, y: f32) -> f32 {
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (x0, y0) = (i32::conv_nearest(x0), i32::conv_nearest(y0));
        let a = |dx, dy| f32::from(self.alpha(x0 + dx, y0 + dy));
        let top = a(0, 0) * (1.0 - fx) + a(1, 0) * fx;
        let bottom = a(0, 1) * (1.0 - fx) + a(1, 1) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Rotate counter-clockwise by `degrees` about the centre
    ///
    /// The result is expanded to [`rotated_size`] so that nothing is cut off.
    /// Coverage is sampled bilinearly.
    pub fn rotate(self, degrees: f32) -> Surface {
        if degrees == 0.0 {
            return self;
        }
        let src = self.size();
        let dst = rotated_size(src, degrees);
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (scx, scy) = (f32::conv(src.0) / 2.0, f32::conv(src.1) / 2.0);
        let (dcx, dcy) = (f32::conv(dst.0) / 2.0, f32::conv(dst.1) / 2.0);

        let mut image = RgbaImage::from_pixel(dst.0, dst.1, self.color.with_alpha(0));
        for (x, y, px) in image.enumerate_pixels_mut() {
            // Offset of this pixel's centre from the centre of the output
            let dx = f32::conv(x) + 0.5 - dcx;
            let dy = f32::conv(y) + 0.5 - dcy;
            // Inverse rotation (y points down)
            let sx = dx * cos - dy * sin + scx - 0.5;
            let sy = dx * sin + dy * cos + scy - 0.5;
            px.0[3] = u8::conv_nearest(self.sample(sx, sy).clamp(0.0, 255.0));
        }
        Surface {
            image,
            color: self.color,
        }
    }

    /// Alpha-composite onto `canvas` with top-left at `origin`
    pub fn composite_onto(&self, canvas: &mut Canvas, origin: Point) {
        image::imageops::overlay(
            canvas.image_mut(),
            &self.image,
            i64::from(origin.0),
            i64::from(origin.1),
        );
    }
}

/// Measures with a [`FontLibrary`] and draws onto a [`Canvas`]
pub struct Painter<'a> {
    fonts: &'a FontLibrary,
    canvas: &'a mut Canvas,
}

impl<'a> Painter<'a> {
    /// Construct
    pub fn new(fonts: &'a FontLibrary, canvas: &'a mut Canvas) -> Self {
        Painter { fonts, canvas }
    }
}

impl<'a> Measure for Painter<'a> {
    #[inline]
    fn measure(&self, text: &str, face: FaceId, scale: TextScale) -> Option<Size> {
        self.fonts.measure(text, face, scale)
    }
}

impl<'a> Paint for Painter<'a> {
    fn paint(&mut self, item: &TextItem, scale: TextScale, rect: Rect) -> Result<(), RenderError> {
        let store = self
            .fonts
            .get(item.face)
            .ok_or(RenderError::UnknownFace(item.face))?;
        let run = TextRun::layout(store, &item.content, scale).ok_or(RenderError::NoGlyphs)?;
        let surface = run.draw(item.color).rotate(item.rotation);

        let found = surface.size();
        let expected = Size(rect.width().cast(), rect.height().cast());
        if found != expected {
            return Err(RenderError::SizeMismatch { expected, found });
        }

        surface.composite_onto(self.canvas, rect.origin());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bar(w: u32, h: u32) -> Surface {
        let image = RgbaImage::from_pixel(w, h, Rgb::BLACK.with_alpha(255));
        Surface {
            image,
            color: Rgb::BLACK,
        }
    }

    #[test]
    fn rotate_zero_is_identity() {
        let s = bar(30, 10).rotate(0.0);
        assert_eq!(s.size(), Size(30, 10));
        assert_eq!(s.alpha(0, 0), 255);
    }

    #[test]
    fn rotate_quarter_turn() {
        let s = bar(30, 10).rotate(90.0);
        assert_eq!(s.size(), Size(10, 30));
        assert_eq!(s.alpha(5, 15), 255);
    }

    #[test]
    fn rotate_preserves_transparency() {
        let s = bar(40, 10).rotate(30.0);
        assert_eq!(s.size(), rotated_size(Size(40, 10), 30.0));
        // corners of the expanded surface are outside the rotated bar
        let Size(w, h) = s.size();
        let (w, h): (i32, i32) = (w.cast(), h.cast());
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert_eq!(s.alpha(x, y), 0, "({x}, {y})");
        }
        // the centre is inside
        assert_eq!(s.alpha(w / 2, h / 2), 255);
        // colour is untouched wherever coverage is partial
        assert!(s.image.pixels().all(|p| p.0[..3] == [0, 0, 0]));
    }

    #[test]
    fn paint_unknown_face() {
        let fonts = FontLibrary::from_database(fontdb::Database::new());
        let mut canvas = Canvas::new(Size(100, 100), Rgb::WHITE);
        let mut painter = Painter::new(&fonts, &mut canvas);
        let item = TextItem::new("A", FaceId(3), Point(10, 10), 40);
        let result = painter.paint(&item, TextScale::new(40, 1.0), Rect::new(10, 10, 50, 50));
        assert_eq!(result, Err(RenderError::UnknownFace(FaceId(3))));
        assert_eq!(canvas.pixel(20, 20), Rgb::WHITE);
    }

    #[test]
    fn composite_blends_coverage() {
        let mut canvas = Canvas::new(Size(20, 20), Rgb::WHITE);
        let mut s = bar(4, 4);
        s.image.get_pixel_mut(0, 0).0[3] = 0;
        s.composite_onto(&mut canvas, Point(2, 3));
        assert_eq!(canvas.pixel(2, 3), Rgb::WHITE);
        assert_eq!(canvas.pixel(3, 3), Rgb::BLACK);
        assert_eq!(canvas.pixel(5, 6), Rgb::BLACK);
        assert_eq!(canvas.pixel(6, 7), Rgb::WHITE);
    }
}
