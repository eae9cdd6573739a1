// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure projections over the fetched catalog.

use crate::model::{CatalogEntry, FavoriteSet};

/// User-entered filter inputs. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub city_text: String,
    pub favorites_only: bool,
}

impl FilterCriteria {
    pub fn new(city_text: impl Into<String>, favorites_only: bool) -> Self {
        Self {
            city_text: city_text.into(),
            favorites_only,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.city_text.is_empty() && !self.favorites_only
    }

    fn needle(&self) -> String {
        self.city_text.to_lowercase()
    }
}

fn passes(entry: &CatalogEntry, needle: &str, favorites_only: bool, favorites: &FavoriteSet) -> bool {
    if favorites_only && !favorites.contains(entry.id()) {
        return false;
    }
    needle.is_empty() || entry.city().to_lowercase().contains(needle)
}

/// Entries whose city contains `criteria.city_text` (case-insensitive) and, when
/// `criteria.favorites_only` is set, that are favorited. Catalog order is kept.
pub fn filter_catalog<'a>(
    catalog: &'a [CatalogEntry],
    criteria: &FilterCriteria,
    favorites: &FavoriteSet,
) -> Vec<&'a CatalogEntry> {
    let needle = criteria.needle();
    catalog
        .iter()
        .filter(|entry| passes(entry, &needle, criteria.favorites_only, favorites))
        .collect()
}

/// Header counters. Recomputed for every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedCounts {
    pub total: usize,
    pub filtered: usize,
    pub favorites: usize,
}

impl DerivedCounts {
    pub fn compute(
        catalog: &[CatalogEntry],
        criteria: &FilterCriteria,
        favorites: &FavoriteSet,
    ) -> Self {
        let needle = criteria.needle();
        let filtered = catalog
            .iter()
            .filter(|entry| passes(entry, &needle, criteria.favorites_only, favorites))
            .count();
        Self {
            total: catalog.len(),
            filtered,
            favorites: favorites.len(),
        }
    }
}
