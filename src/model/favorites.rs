// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entry::EntryId;

/// The persisted favorite value could not be read as a JSON integer array.
#[derive(Debug, thiserror::Error)]
#[error("favorites value is not a JSON integer array: {source}")]
pub struct FavoritesParseError {
    #[from]
    source: serde_json::Error,
}

/// Set of favorited entry ids.
///
/// Membership is the only semantic: equality ignores order. Insertion order is kept so the
/// serialized form is stable across toggles of unrelated ids.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: Vec<EntryId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.ids.iter().copied()
    }

    /// Adds `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: EntryId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`; returns `false` if it was not present.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Flips membership of `id` and returns whether it is a member afterwards.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Canonical persisted form, e.g. `[3,7,12]`.
    pub fn to_json(&self) -> String {
        let raw: Vec<i64> = self.ids.iter().map(|id| id.get()).collect();
        serde_json::to_string(&raw).unwrap_or_else(|_| "[]".to_owned())
    }

    /// Strict parse of the persisted form. Duplicate ids collapse to their first occurrence.
    pub fn from_json(raw: &str) -> Result<Self, FavoritesParseError> {
        let values: Vec<i64> = serde_json::from_str(raw)?;
        Ok(values.into_iter().map(EntryId::new).collect())
    }

    /// Fail-safe parse used for storage reads: absent or corrupt values yield an empty set.
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::new();
        };
        match Self::from_json(raw) {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable favorites value");
                Self::new()
            }
        }
    }
}

impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id))
    }
}

impl Eq for FavoriteSet {}

impl FromIterator<EntryId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = EntryId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FavoriteSet {
    type Item = EntryId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, EntryId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
