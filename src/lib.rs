// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Poster composition library
//!
//! Turns a free-text event description into a rastered poster. The core is
//! a greedy layout engine: each text item (event name, date, location) is
//! shrunk until it fits inside the canvas without overlapping previously
//! placed items, then drawn and recorded in an [`Occupancy`] set.
//!
//! ```no_run
//! use poster_layout::{fonts::FontLibrary, Config, Poster};
//!
//! let config = Config::default();
//! let fonts = FontLibrary::new(&config);
//! let poster = Poster::new(config, fonts);
//! let report = poster
//!     .generate("fun nature fair on August 12, 2025 in the park", "poster.png")
//!     .unwrap();
//! assert!(report.placed().count() <= 3);
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub(crate) mod conv;

mod data;
pub use data::*;

mod env;
pub use env::*;

pub mod fonts;

mod geometry;
pub use geometry::{rotated_bbox, rotated_size};

mod occupancy;
pub use occupancy::Occupancy;

pub mod search;
pub use search::{find_position, Proposal, Strategy};

mod metrics;
pub use metrics::{Measure, TextScale};

pub mod raster;

mod canvas;
pub use canvas::Canvas;

mod placer;
pub use placer::{Paint, PlaceError, Placement, Placer, TextItem};

mod poster;
pub use poster::{layout, Composition, Faces, ItemOutcome, LayoutReport, Poster, PosterError, Role};

pub mod design;
pub mod extract;
pub mod palette;
pub mod rng;
pub mod shapes;
