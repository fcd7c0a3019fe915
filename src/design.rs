// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Visual design derived from event information

use crate::extract::EventInfo;
use crate::palette::{self, Palette};
use crate::rng::Rng;
use crate::shapes::Shape;
use crate::Labels;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Design parameters of a poster
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DesignParams {
    /// Colours; the first is the background
    pub palette: Palette,
    /// Inclusive range from which the event name's base size is drawn
    pub size_range: (u32, u32),
    /// Shape motif, or `None` for a random shape
    pub shape: Option<Shape>,
}

impl DesignParams {
    /// Derive a design from `info`
    ///
    /// -   events with a date get a warm palette, others a neutral one; the
    ///     background is chosen at random from the palette's colours
    /// -   short event names get larger text
    /// -   a shape is suggested by the location, if any
    ///
    /// The name length is that of the displayed name: `labels.event_name` if
    /// `info` has no name or a blank one.
    pub fn from_event(info: &EventInfo, labels: &Labels, rng: &mut Rng) -> Self {
        let palette = match info.date() {
            Some(_) => palette::warm(),
            None => palette::neutral(),
        };
        let palette = palette.shuffled_background(rng);

        let name = info.event_name().unwrap_or(&labels.event_name);
        let size_range = size_range(name.chars().count());

        let shape = info.location().and_then(Shape::from_location);

        let params = DesignParams {
            palette,
            size_range,
            shape,
        };
        log::debug!("DesignParams::from_event: {params:?}");
        params
    }

    /// Draw a base size for the event name from [`Self::size_range`]
    pub fn name_size(&self, rng: &mut Rng) -> u32 {
        rng.range(self.size_range.0, self.size_range.1)
    }
}

/// Font size range for an event name of `len` characters
pub fn size_range(len: usize) -> (u32, u32) {
    match len {
        0..=9 => (150, 200),
        10..=29 => (80, 140),
        _ => (40, 80),
    }
}
