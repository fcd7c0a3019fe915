// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Poster layout and composition
//!
//! Items are laid out strictly in priority order: event name, date, then
//! location. Each success is committed before the next item is attempted,
//! so earlier items are never displaced by later ones. Layout is greedy: an
//! item which cannot be placed is left out and the poster is still produced.

use crate::conv::to_i32;
use crate::design::DesignParams;
use crate::extract::{EventInfo, Extract, KeywordExtractor};
use crate::fonts::{FaceId, FamilyName, FontLibrary, FontSelector, NoFontMatch, Weight};
use crate::placer::Paint;
use crate::raster::Painter;
use crate::rng::Rng;
use crate::shapes::{BasicShapes, ShapeRenderer};
use crate::{Canvas, Config, Occupancy, PlaceError, Placement, Placer, Point, TextItem};
use std::path::Path;
use thiserror::Error;

/// Left edge of the preferred position of every item
const LEFT: i32 = 50;

/// Rotation candidates (degrees counter-clockwise) per role
const NAME_ROTATIONS: &[f32] = &[0.0, 0.0, 4.0, -4.0];
const DATE_ROTATIONS: &[f32] = &[0.0, 0.0, -3.0];
const LOCATION_ROTATIONS: &[f32] = &[0.0];

/// Vertical stretch candidates for the event name
const NAME_STRETCH: &[f32] = &[1.0, 1.1, 1.25];

/// The semantic role of a text item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    EventName,
    Date,
    Location,
}

/// The outcome of placing one item
#[derive(Clone, Debug, PartialEq)]
pub struct ItemOutcome {
    pub role: Role,
    pub item: TextItem,
    pub result: Result<Placement, PlaceError>,
}

/// The result of a layout pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutReport {
    /// Rectangles of all placed items
    pub occupancy: Occupancy,
    /// Outcomes, in the order items were attempted
    pub outcomes: Vec<ItemOutcome>,
}

impl LayoutReport {
    /// Items which were placed, with their placement
    pub fn placed(&self) -> impl Iterator<Item = (&ItemOutcome, &Placement)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|p| (o, p)))
    }

    /// Items which could not be placed, with the reason
    pub fn failed(&self) -> impl Iterator<Item = (&ItemOutcome, &PlaceError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    /// Get the outcome for `role`, if such an item was attempted
    pub fn outcome(&self, role: Role) -> Option<&ItemOutcome> {
        self.outcomes.iter().find(|o| o.role == role)
    }
}

/// Lay out `items` in order
///
/// Failures are logged and recorded; they never abort the pass.
pub fn layout<P: Paint>(
    placer: &Placer,
    painter: &mut P,
    items: impl IntoIterator<Item = (Role, TextItem)>,
) -> LayoutReport {
    let mut report = LayoutReport::default();
    for (role, item) in items {
        let result = placer.place(&item, &mut report.occupancy, painter);
        if let Err(err) = &result {
            log::warn!("layout: failed to place {role:?} {:?}: {err}", item.content);
        }
        report.outcomes.push(ItemOutcome { role, item, result });
    }
    report
}

/// A finished poster
#[derive(Debug)]
pub struct Composition {
    pub canvas: Canvas,
    pub report: LayoutReport,
}

/// Poster generation errors
#[derive(Error, Debug)]
pub enum PosterError {
    #[error("no usable font")]
    Font(#[from] NoFontMatch),
    #[error("failed to encode image")]
    Image(#[from] image::ImageError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Font faces used by a poster
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Faces {
    /// Used for the event name
    pub bold: FaceId,
    /// Used for date and location
    pub regular: FaceId,
}

/// Poster generator
///
/// Combines an extractor, a shape renderer, a font library and layout
/// configuration. The defaults are [`KeywordExtractor`] and [`BasicShapes`].
pub struct Poster<E = KeywordExtractor, S = BasicShapes> {
    config: Config,
    fonts: FontLibrary,
    placer: Placer,
    extractor: E,
    shapes: S,
}

impl Poster {
    /// Construct with the default extractor and shape renderer
    ///
    /// Panics if `config` is invalid (see [`Config::validate`]).
    pub fn new(config: Config, fonts: FontLibrary) -> Self {
        Poster::with_parts(config, fonts, KeywordExtractor, BasicShapes)
    }
}

impl<E: Extract, S: ShapeRenderer> Poster<E, S> {
    /// Construct from parts
    ///
    /// Panics if `config` is invalid (see [`Config::validate`]).
    pub fn with_parts(config: Config, fonts: FontLibrary, extractor: E, shapes: S) -> Self {
        let placer = Placer::new(&config);
        Poster {
            config,
            fonts,
            placer,
            extractor,
            shapes,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Resolve faces from [`Config::font_families`]
    pub fn faces(&self) -> Result<Faces, NoFontMatch> {
        let families = || {
            self.config
                .font_families
                .iter()
                .map(|name| FamilyName::from(name.as_str()))
        };
        let bold = self.fonts.select(&FontSelector::with_weight(families(), Weight::BOLD))?;
        let regular = self.fonts.select(&FontSelector::with_weight(families(), Weight::NORMAL))?;
        Ok(Faces { bold, regular })
    }

    /// Build the text items for an event
    ///
    /// Missing fields are replaced with [`Config::labels`]; all text is
    /// upper-cased. The event name's base size is drawn from the design's
    /// size range; the date uses half and the location a third of the
    /// range's maximum.
    pub fn items_for(
        &self,
        info: &EventInfo,
        design: &DesignParams,
        faces: Faces,
        rng: &mut Rng,
    ) -> Vec<(Role, TextItem)> {
        let labels = &self.config.labels;
        let height = to_i32(self.config.canvas.1);
        let max = design.size_range.1;
        let colors = design.palette.text_colors();
        let color = |i: usize| colors[i % colors.len()];

        let text = |field: Option<&str>, label: &str| field.unwrap_or(label).to_uppercase();
        let name_size = design.name_size(rng);
        let name_stretch = rng.choose(NAME_STRETCH).copied().unwrap_or(1.0);
        let mut make = |content: String, face: FaceId, y: i32, base: u32, rotations: &[f32]| {
            let base = base.max(self.config.min_size);
            let mut item = TextItem::new(content, face, Point(LEFT, y), base);
            item.min_size = self.config.min_size;
            item.rotation = rng.choose(rotations).copied().unwrap_or(0.0);
            item
        };

        let mut name = make(
            text(info.event_name(), &labels.event_name),
            faces.bold,
            LEFT,
            name_size,
            NAME_ROTATIONS,
        );
        name.color = color(0);
        name.stretch = name_stretch;

        let mut date = make(
            text(info.date(), &labels.date),
            faces.regular,
            height * 11 / 20,
            max / 2,
            DATE_ROTATIONS,
        );
        date.color = color(1);

        let mut location = make(
            text(info.location(), &labels.location),
            faces.regular,
            height * 3 / 4,
            max / 3,
            LOCATION_ROTATIONS,
        );
        location.color = color(0);

        vec![
            (Role::EventName, name),
            (Role::Date, date),
            (Role::Location, location),
        ]
    }

    /// Lay out `items` onto `canvas`
    pub fn layout(
        &self,
        canvas: &mut Canvas,
        items: impl IntoIterator<Item = (Role, TextItem)>,
    ) -> LayoutReport {
        let mut painter = Painter::new(&self.fonts, canvas);
        layout(&self.placer, &mut painter, items)
    }

    /// Compose a poster: background, shape, then text
    pub fn compose(
        &self,
        info: &EventInfo,
        design: &DesignParams,
        rng: &mut Rng,
    ) -> Result<Composition, NoFontMatch> {
        let faces = self.faces()?;
        let mut canvas = Canvas::new(self.config.canvas, design.palette.background());
        self.shapes
            .draw(design.shape, &design.palette, &mut canvas, rng);
        let items = self.items_for(info, design, faces, rng);
        let report = self.layout(&mut canvas, items);
        Ok(Composition { canvas, report })
    }

    /// Generate a poster from a description and write it to `path` as PNG
    ///
    /// Parent directories are created as required. The result is
    /// deterministic for a given [`Config::seed`].
    pub fn generate(
        &self,
        text: &str,
        path: impl AsRef<Path>,
    ) -> Result<LayoutReport, PosterError> {
        let path = path.as_ref();
        let mut rng = Rng::new(self.config.seed);
        let info = self.extractor.extract(text);
        let design = DesignParams::from_event(&info, &self.config.labels, &mut rng);
        let Composition { canvas, report } = self.compose(&info, &design, &mut rng)?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        canvas.save_png(path)?;
        log::info!(
            "Poster saved to {}: {} of {} items placed",
            path.display(),
            report.placed().count(),
            report.outcomes.len()
        );
        Ok(report)
    }
}
