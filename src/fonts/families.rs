// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Common font names
//!
//! `fontdb` does not choose a default family for each generic category; we
//! pick the first available from a preference list. Posters favour bold,
//! geometric sans-serif faces, hence the ordering below.

const DEFAULT_SANS_SERIF: [&str; 12] = [
    "Roboto",
    "Open Sans",
    "Lato",
    "Noto Sans",
    "DejaVu Sans",
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "Cantarell",
    "Verdana",
    "Tahoma",
    "Droid Sans",
];

const DEFAULT_SERIF: [&str; 8] = [
    "Georgia",
    "Palatino",
    "Noto Serif",
    "DejaVu Serif",
    "Times New Roman",
    "Times",
    "Liberation Serif",
    "Droid Serif",
];

/// First family of `candidates` present in `db`
fn first_available<'a>(db: &fontdb::Database, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|name| {
        db.faces()
            .any(|face| face.families.iter().any(|(family, _)| family == *name))
    })
}

/// Use this to set default font families after loading fonts
pub fn set_defaults(db: &mut fontdb::Database) {
    if let Some(name) = first_available(db, &DEFAULT_SANS_SERIF) {
        log::info!("Default sans-serif font: {name}");
        db.set_sans_serif_family(name);
    }
    if let Some(name) = first_available(db, &DEFAULT_SERIF) {
        log::info!("Default serif font: {name}");
        db.set_serif_family(name);
    }
}
