// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! System font lookup.
//!
//! Caption fonts are referenced by family name. The font book resolves the
//! families offered in the UI once at startup and falls back to a generic
//! sans-serif face for anything it cannot find.

use crate::models::overlay::FONT_FAMILIES;
use ab_glyph::{FontArc, FontVec};
use fontdb::{Database, Family, Query};
use std::collections::HashMap;

/// Parsed fonts keyed by family name.
#[derive(Clone, Default)]
pub struct FontBook {
    families: HashMap<String, FontArc>,
    fallback: Option<FontArc>,
}

impl FontBook {
    /// A font book with no faces; text is measured as zero width.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve the UI font families (plus the placeholder font) from the
    /// installed system fonts.
    pub fn load_system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Font database holds {} faces", db.len());

        let mut families = HashMap::new();
        for name in FONT_FAMILIES.iter().copied().chain(["Arial"]) {
            if families.contains_key(name) {
                continue;
            }
            match query_face(&db, Family::Name(name)) {
                Some(font) => {
                    families.insert(name.to_string(), font);
                }
                None => log::warn!("Font family '{}' not installed, using fallback", name),
            }
        }

        let fallback = query_face(&db, Family::SansSerif).or_else(|| {
            db.faces()
                .find_map(|face| load_face(&db, face.id))
        });
        if fallback.is_none() {
            log::warn!("No usable system fonts found; captions will not be drawn");
        }

        Self { families, fallback }
    }

    /// The font for `family`, or the fallback face.
    pub fn font(&self, family: &str) -> Option<&FontArc> {
        self.families.get(family).or(self.fallback.as_ref())
    }
}

fn query_face(db: &Database, family: Family<'_>) -> Option<FontArc> {
    let id = db.query(&Query {
        families: &[family],
        ..Default::default()
    })?;
    load_face(db, id)
}

fn load_face(db: &Database, id: fontdb::ID) -> Option<FontArc> {
    db.with_face_data(id, |data, index| {
        FontVec::try_from_vec_and_index(data.to_vec(), index)
            .map(FontArc::new)
            .map_err(|e| log::warn!("Failed to parse font face {:?}: {}", id, e))
            .ok()
    })
    .flatten()
}
