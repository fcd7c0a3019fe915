// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Colour palettes

use crate::rng::Rng;
use crate::Rgb;
use easy_cast::Cast;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Foreground colours with a contrast ratio below this are avoided where
/// possible (WCAG AA for large text)
pub const MIN_CONTRAST: f32 = 3.0;

/// Palette construction failed
#[derive(Error, Debug, PartialEq, Eq)]
#[error("palette needs at least two colours, found {0}")]
pub struct TooFewColors(pub usize);

/// An ordered list of at least two colours
///
/// The first colour is the background; the rest are accents.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>"))]
pub struct Palette(Vec<Rgb>);

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = TooFewColors;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, TooFewColors> {
        if colors.len() < 2 {
            return Err(TooFewColors(colors.len()));
        }
        Ok(Palette(colors))
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

impl Palette {
    /// Construct
    ///
    /// Panics if fewer than two colours are given.
    pub fn new(colors: impl Into<Vec<Rgb>>) -> Self {
        let colors = colors.into();
        assert!(colors.len() >= 2, "Palette: need at least two colours");
        Palette(colors)
    }

    /// All colours, background first
    pub fn colors(&self) -> &[Rgb] {
        &self.0
    }

    pub fn background(&self) -> Rgb {
        self.0[0]
    }

    /// Accent colours (everything but the background)
    pub fn accents(&self) -> &[Rgb] {
        &self.0[1..]
    }

    /// Accents ordered by contrast against the background, best first
    pub fn by_contrast(&self) -> Vec<Rgb> {
        let bg = self.background();
        let mut colors = self.accents().to_vec();
        colors.sort_by(|a, b| b.contrast(bg).total_cmp(&a.contrast(bg)));
        colors
    }

    /// Text colours with acceptable contrast against the background
    ///
    /// If no accent reaches [`MIN_CONTRAST`], black or white (whichever
    /// contrasts more) is used instead.
    pub fn text_colors(&self) -> Vec<Rgb> {
        let bg = self.background();
        let colors: Vec<Rgb> = self
            .by_contrast()
            .into_iter()
            .filter(|c| c.contrast(bg) >= MIN_CONTRAST)
            .collect();
        if !colors.is_empty() {
            return colors;
        }
        if bg.contrast(Rgb::BLACK) >= bg.contrast(Rgb::WHITE) {
            vec![Rgb::BLACK]
        } else {
            vec![Rgb::WHITE]
        }
    }

    /// Pick a background at random from this palette's colours, keeping the
    /// rest as accents
    pub fn shuffled_background(&self, rng: &mut Rng) -> Palette {
        let i: usize = rng.range(0, (self.0.len() - 1).cast()).cast();
        let mut colors = self.0.clone();
        colors.swap(0, i);
        Palette(colors)
    }
}

/// Warm, high-energy colours: used when an event has a date
pub fn warm() -> Palette {
    Palette::new([Rgb(239, 71, 111), Rgb(255, 209, 102), Rgb(255, 255, 255)])
}

/// Greys: used when an event has no date
pub fn neutral() -> Palette {
    Palette::new([Rgb(200, 200, 200), Rgb(100, 100, 100), Rgb(150, 150, 150)])
}
