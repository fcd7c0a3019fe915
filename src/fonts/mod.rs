// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font selection and loading
//!
//! Fonts are managed by a [`FontLibrary`], constructed explicitly from a
//! [`crate::Config`]. A [`FontSelector`] (family list, weight and style) is
//! resolved to a [`FaceId`] before layout begins; during layout faces are
//! only read.
//!
//! ### Font sizes
//!
//! Font sizes in this library are given in *pixels per Em* (`dpem`). An
//! *Em* is nominally the width of a capital `M`; a font file defines its
//! glyphs in *font units*, of which there are `units_per_em` per Em.
//!
//! Note that `ab_glyph` scales fonts by *line height* rather than by Em;
//! [`FaceStore::px_scale`] converts.

mod face;
mod families;
mod library;
mod selector;

pub use face::FaceRef;
pub use families::set_defaults;
pub use library::{FaceId, FaceStore, FontError, FontLibrary, NoFontMatch};
pub use selector::{FamilyName, FontSelector};

pub use fontdb::{Style, Weight};
