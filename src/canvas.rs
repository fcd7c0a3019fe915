// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! The poster canvas

use crate::conv::{to_i32, to_u32};
use crate::{Rect, Rgb, Size};
use easy_cast::Conv;
use image::buffer::ConvertBuffer;
use image::{ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// A fixed-size pixel surface
///
/// The origin is top-left with `y` increasing downward. The buffer is RGBA
/// so that text and shapes may be alpha-composited; it is fully opaque.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Construct, filled with `background`
    ///
    /// Panics if `size` is empty.
    pub fn new(size: Size, background: Rgb) -> Self {
        assert!(!size.is_empty(), "Canvas: empty size {size:?}");
        Canvas {
            image: RgbaImage::from_pixel(size.0, size.1, background.with_alpha(255)),
        }
    }

    /// Size in pixels
    #[inline]
    pub fn size(&self) -> Size {
        Size(self.image.width(), self.image.height())
    }

    /// The full canvas as a rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        let Size(w, h) = self.size();
        Rect::new(0, 0, to_i32(w), to_i32(h))
    }

    /// Read a pixel
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Rgb(r, g, b)
    }

    /// Access the pixel buffer
    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Fill each pixel within `bounds` whose centre satisfies `inside`
    ///
    /// `bounds` is clipped to the canvas. `inside` receives the pixel centre
    /// in canvas coordinates.
    pub fn fill_where(&mut self, bounds: Rect, color: Rgb, inside: impl Fn(f32, f32) -> bool) {
        let full = self.rect();
        let x1 = bounds.x1.max(full.x1);
        let y1 = bounds.y1.max(full.y1);
        let x2 = bounds.x2.min(full.x2);
        let y2 = bounds.y2.min(full.y2);
        let px = color.with_alpha(255);
        for y in y1..y2 {
            for x in x1..x2 {
                if inside(f32::conv(x) + 0.5, f32::conv(y) + 0.5) {
                    self.image.put_pixel(to_u32(x), to_u32(y), px);
                }
            }
        }
    }

    /// Fill a rectangle (clipped to the canvas)
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.fill_where(rect, color, |_, _| true);
    }

    /// Take the pixel buffer
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write as an RGB PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let rgb: RgbImage = self.image.convert();
        rgb.save_with_format(path, ImageFormat::Png)
    }
}
