// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font face types

use ttf_parser::Face;

/// Handle to a loaded font face
#[derive(Copy, Clone, Debug)]
pub struct FaceRef(pub(crate) &'static Face<'static>);

impl FaceRef {
    /// True if the face has a glyph for `c`
    ///
    /// Glyph 0 is the 'missing glyph' representation; this returns false for
    /// characters which would be drawn with it.
    #[inline]
    pub fn has_glyph(&self, c: char) -> bool {
        self.0.glyph_index(c).map(|id| id.0 != 0).unwrap_or(false)
    }

    /// Characters of `text` this face cannot represent
    ///
    /// Whitespace and control characters are ignored.
    pub fn missing_glyphs<'t>(&self, text: &'t str) -> impl Iterator<Item = char> + 't {
        let face = *self;
        text.chars()
            .filter(move |c| !c.is_whitespace() && !c.is_control() && !face.has_glyph(*c))
    }

    /// Font units per Em
    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.0.units_per_em()
    }
}
