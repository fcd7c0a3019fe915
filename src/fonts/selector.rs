// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font selection
//!
//! Family names mirror those of `fontdb` to avoid any public dependency on
//! its lifetime-bound query types.

use fontdb::{Family, Style, Weight};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A possible value for the `font-family` CSS property.
///
/// These descriptions are taken from
/// [CSS Fonts Level 3 § 3.1](https://drafts.csswg.org/css-fonts-3/#font-family-prop).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FamilyName {
    /// A specific font family, specified by name: e.g. "Arial", "times".
    Named(String),
    /// Serif fonts represent the formal text style for a script.
    Serif,
    /// Glyphs in sans-serif fonts are generally low contrast and have stroke
    /// endings that are plain.
    SansSerif,
    /// The sole criterion of a monospace font is that all glyphs have the same fixed width.
    Monospace,
    /// Glyphs in cursive fonts generally use a more informal script style.
    Cursive,
    /// Fantasy fonts are primarily decorative or expressive fonts.
    Fantasy,
}

impl From<&str> for FamilyName {
    fn from(name: &str) -> Self {
        FamilyName::Named(name.to_string())
    }
}

impl<'a> From<&'a FamilyName> for Family<'a> {
    fn from(name: &'a FamilyName) -> Self {
        match name {
            FamilyName::Named(name) => Family::Name(name),
            FamilyName::Serif => Family::Serif,
            FamilyName::SansSerif => Family::SansSerif,
            FamilyName::Monospace => Family::Monospace,
            FamilyName::Cursive => Family::Cursive,
            FamilyName::Fantasy => Family::Fantasy,
        }
    }
}

/// A font face selection tool
///
/// Selects a face according to family, weight and style from the fonts known
/// to a [`super::FontLibrary`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontSelector {
    families: Vec<FamilyName>,
    weight: Weight,
    style: Style,
}

impl FontSelector {
    /// Synonym for default
    ///
    /// Without further parametrization, this will select a generic sans-serif
    /// font of normal weight.
    #[inline]
    pub fn new() -> Self {
        FontSelector::default()
    }

    /// Construct from family names and a weight
    pub fn with_weight(families: impl IntoIterator<Item: Into<FamilyName>>, weight: Weight) -> Self {
        let mut sel = FontSelector::new();
        sel.set_families(families);
        sel.set_weight(weight);
        sel
    }

    /// Set family name(s)
    ///
    /// If multiple names are passed, the first to successfully resolve a font
    /// is used. A generic sans-serif family is always tried last.
    pub fn set_families(&mut self, families: impl IntoIterator<Item: Into<FamilyName>>) {
        self.families = families.into_iter().map(|item| item.into()).collect();
    }

    /// Set style
    #[inline]
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Set weight
    #[inline]
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Get weight
    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Get style
    #[inline]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Families for a database query, with sans-serif fallback appended
    pub(crate) fn query_families(&self) -> Vec<Family<'_>> {
        let mut families: Vec<Family> = self.families.iter().map(Family::from).collect();
        if !self.families.contains(&FamilyName::SansSerif) {
            families.push(Family::SansSerif);
        }
        families
    }
}
