// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font library

use super::{set_defaults, FaceRef, FontSelector};
use crate::Config;
use easy_cast::Cast;
use fontdb::{Database, Query, Stretch, ID};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use ttf_parser::Face;

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("font load error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[error("font load error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
    #[error("font source unavailable")]
    Unavailable,
}

/// No matching font found
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no font match")]
pub struct NoFontMatch;

/// Font face identifier
///
/// Identifies a loaded font face within the [`FontLibrary`] by index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceId(pub(crate) u32);

impl FaceId {
    /// Get as `usize`
    pub fn get(self) -> usize {
        self.0.cast()
    }
}

impl From<u32> for FaceId {
    fn from(id: u32) -> Self {
        FaceId(id)
    }
}

/// A store of data for a font face
///
/// Stores are never dropped: font data lives until program exit. This allows
/// both the `ttf_parser` and `ab_glyph` representations to borrow the same
/// data.
pub struct FaceStore {
    index: u32,
    face: Face<'static>,
    ab_glyph: ab_glyph::FontRef<'static>,
}

impl FaceStore {
    /// Construct from font file data and a face index within that file
    fn new(data: Vec<u8>, index: u32) -> Result<&'static Self, FontError> {
        // Validate before leaking anything
        Face::parse(&data, index)?;

        let data: &'static [u8] = Box::leak(data.into_boxed_slice());
        let face = Face::parse(data, index)?;
        let ab_glyph = ab_glyph::FontRef::try_from_slice_and_index(data, index)?;
        Ok(Box::leak(Box::new(FaceStore {
            index,
            face,
            ab_glyph,
        })))
    }

    /// Access a [`FaceRef`] object
    pub fn face_ref(&'static self) -> FaceRef {
        FaceRef(&self.face)
    }

    /// Access the [`ab_glyph`] object
    pub fn ab_glyph(&self) -> &ab_glyph::FontRef<'static> {
        &self.ab_glyph
    }

    /// Convert a size in pixels per Em to an `ab_glyph` scale
    ///
    /// The vertical scale is multiplied by `stretch`.
    pub fn px_scale(&self, dpem: f32, stretch: f32) -> ab_glyph::PxScale {
        use ab_glyph::Font;

        let font = &self.ab_glyph;
        let upem = font.units_per_em().unwrap_or(1000.0);
        let scale = dpem * font.height_unscaled() / upem;
        ab_glyph::PxScale {
            x: scale,
            y: scale * stretch,
        }
    }
}

impl std::fmt::Debug for FaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FaceStore")
            .field("index", &self.index)
            .field("units_per_em", &self.face.units_per_em())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct FaceList {
    faces: Vec<&'static FaceStore>,
    // These are vec-maps. Why? Because length should be short.
    sources: Vec<(ID, FaceId)>,
    selections: HashMap<FontSelector, FaceId>,
}

impl FaceList {
    fn push(&mut self, face: &'static FaceStore, source: ID) -> FaceId {
        let id = FaceId(self.faces.len().cast());
        self.faces.push(face);
        self.sources.push((source, id));
        id
    }
}

/// Library of loaded fonts
///
/// Font discovery happens on construction. Faces are loaded on first
/// selection and cached; thread-safety is handled via an internal lock, thus
/// a library may be shared between threads composing independent posters.
pub struct FontLibrary {
    db: Database,
    faces: RwLock<FaceList>,
}

impl FontLibrary {
    /// Construct, discovering system fonts and fonts under
    /// [`Config::font_dirs`]
    pub fn new(config: &Config) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        Self::from_database(db)
    }

    /// Construct from a prepared font database
    pub fn from_database(mut db: Database) -> Self {
        log::info!("Found {} fonts", db.len());
        set_defaults(&mut db);
        FontLibrary {
            db,
            faces: Default::default(),
        }
    }

    /// Select a font face
    ///
    /// Results are cached: selecting with an equal selector a second time
    /// yields the same [`FaceId`] without a database query.
    pub fn select(&self, selector: &FontSelector) -> Result<FaceId, NoFontMatch> {
        if let Some(id) = self.faces.read().unwrap().selections.get(selector) {
            return Ok(*id);
        }

        let families = selector.query_families();
        let query = Query {
            families: &families,
            weight: selector.weight(),
            stretch: Stretch::Normal,
            style: selector.style(),
        };
        let source = self.db.query(&query).ok_or(NoFontMatch)?;
        if let Some(info) = self.db.face(source) {
            log::debug!("select({selector:?}): match {}", info.post_script_name);
        }

        let mut list = self.faces.write().unwrap();
        let id = match list.sources.iter().find(|(s, _)| *s == source) {
            Some((_, id)) => *id,
            None => {
                let store = self
                    .db
                    .with_face_data(source, |data, index| FaceStore::new(data.to_vec(), index))
                    .unwrap_or(Err(FontError::Unavailable))
                    .map_err(|err| {
                        log::error!("Failed to load font: {err}");
                        NoFontMatch
                    })?;
                list.push(store, source)
            }
        };
        list.selections.insert(selector.clone(), id);
        Ok(id)
    }

    /// Get access to a loaded [`FaceStore`]
    ///
    /// Returns `None` if `id` was not issued by this library.
    pub fn get(&self, id: FaceId) -> Option<&'static FaceStore> {
        self.faces.read().unwrap().faces.get(id.get()).copied()
    }

    /// Number of loaded faces
    pub fn num_faces(&self) -> usize {
        self.faces.read().unwrap().faces.len()
    }
}
