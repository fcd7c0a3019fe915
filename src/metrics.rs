// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Text measurement

use crate::fonts::{FaceId, FontLibrary};
use crate::raster::TextRun;
use crate::Size;
use easy_cast::Cast;

/// Font scale of a text item
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextScale {
    /// Font size in pixels per Em
    pub dpem: f32,
    /// Vertical stretch factor
    ///
    /// The vertical scale is `dpem * stretch`; width is not affected.
    pub stretch: f32,
}

impl TextScale {
    /// Construct from an integer font size and a stretch factor
    #[inline]
    pub fn new(size: u32, stretch: f32) -> Self {
        TextScale {
            dpem: size.cast(),
            stretch,
        }
    }

    /// True if both components are finite and positive
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.dpem.is_finite() && self.dpem > 0.0 && self.stretch.is_finite() && self.stretch > 0.0
    }
}

/// Text measurement
///
/// Implementations must report exactly the size of what would be drawn for
/// the same input; any difference shows up as misplaced or clipped text.
pub trait Measure {
    /// Measure `text` set upright in `face` at `scale`
    ///
    /// The result is the size of the inked area in whole pixels. Text is
    /// measured as given; callers should apply case conversion first.
    ///
    /// Returns `None` if nothing would be drawn: for empty text, text
    /// containing only whitespace, an unknown face or an invalid scale.
    fn measure(&self, text: &str, face: FaceId, scale: TextScale) -> Option<Size>;
}

impl Measure for FontLibrary {
    fn measure(&self, text: &str, face: FaceId, scale: TextScale) -> Option<Size> {
        let store = self.get(face)?;
        if log::log_enabled!(log::Level::Debug) {
            let missing: String = store.face_ref().missing_glyphs(text).collect();
            if !missing.is_empty() {
                log::debug!("measure: {face:?} has no glyphs for {missing:?}");
            }
        }
        TextRun::layout(store, text, scale).map(|run| run.size())
    }
}
