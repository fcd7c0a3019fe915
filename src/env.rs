// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Poster library — layout configuration

use crate::Size;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Behaviour of the placer when an item overlaps previously placed text
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fallback {
    /// Look for another position at the same size, then shrink
    ///
    /// Candidate positions come from [`crate::find_position`]; a clamped
    /// (possibly overlapping) proposal is never accepted.
    #[default]
    Relocate,
    /// Keep the preferred position and shrink until the overlap disappears
    Shrink,
}

/// Labels substituted for event fields which could not be extracted
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Labels {
    pub event_name: String,
    pub date: String,
    pub location: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            event_name: "Event Name".into(),
            date: "Date".into(),
            location: "Location".into(),
        }
    }
}

/// Configuration of a poster layout pass
///
/// All settings are passed explicitly when constructing a [`crate::Poster`];
/// nothing is read from global state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Canvas size in pixels
    ///
    /// The default is a portrait poster of 1080×1350 pixels.
    pub canvas: Size,
    /// Minimum separation between placed items and from the canvas edge
    pub margin: u32,
    /// Font size decrement between placement attempts
    pub size_step: u32,
    /// Smallest font size (pixels per Em) any item will be shrunk to
    pub min_size: u32,
    /// Behaviour on overlap
    pub fallback: Fallback,
    /// Substitute text for missing event fields
    pub labels: Labels,
    /// Additional directories to search for font files
    ///
    /// System fonts are always loaded; these are loaded in addition.
    pub font_dirs: Vec<PathBuf>,
    /// Preferred font family names, in order of preference
    ///
    /// If empty (or none match), a generic sans-serif family is used.
    pub font_families: Vec<String>,
    /// Seed for random design choices (palette, shape, size, rotation)
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas: Size(1080, 1350),
            margin: 20,
            size_step: 5,
            min_size: 20,
            fallback: Fallback::default(),
            labels: Labels::default(),
            font_dirs: vec![],
            font_families: vec!["Roboto".into()],
            seed: 0,
        }
    }
}

impl Config {
    /// Construct with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the margin
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the overlap fallback
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Add a directory to search for fonts
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check preconditions
    ///
    /// Panics if the canvas is empty, if the margin leaves no usable area or
    /// if `size_step` is zero. These are programming errors, not layout
    /// failures.
    pub fn validate(&self) {
        assert!(!self.canvas.is_empty(), "Config: empty canvas {:?}", self.canvas);
        assert!(
            2 * self.margin < self.canvas.0.min(self.canvas.1),
            "Config: margin {} leaves no usable area",
            self.margin
        );
        assert!(self.size_step > 0, "Config: size_step must be positive");
    }
}
