// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use super::area::{ContextId, StorageArea, StorageError};
use crate::model::{EntryId, FavoriteSet};

/// Storage slot holding the serialized favorite set.
pub const FAVORITES_KEY: &str = "favorites";

/// Owner of one context's favorite set.
///
/// Constructed once per browsing context and handed to consumers by reference. Every successful
/// [`FavoriteStore::toggle`] writes the full set to the shared storage slot exactly once.
pub struct FavoriteStore {
    storage: Arc<dyn StorageArea>,
    context: ContextId,
    favorites: FavoriteSet,
}

impl FavoriteStore {
    /// Loads the persisted set. Absent, unreadable or corrupt values all yield an empty set.
    pub fn load(storage: Arc<dyn StorageArea>, context: ContextId) -> Self {
        let raw = match storage.get_item(FAVORITES_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, %context, "failed to read favorites; starting empty");
                None
            }
        };
        let favorites = FavoriteSet::from_stored(raw.as_deref());
        tracing::debug!(%context, count = favorites.len(), "favorites loaded");
        Self {
            storage,
            context,
            favorites,
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn storage(&self) -> &Arc<dyn StorageArea> {
        &self.storage
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.favorites.contains(id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Flips membership of `id` and persists the whole set.
    ///
    /// If the write fails the flip is undone, so memory never runs ahead of storage.
    pub fn toggle(&mut self, id: EntryId) -> Result<&FavoriteSet, StorageError> {
        let now_member = self.favorites.toggle(id);
        let serialized = self.favorites.to_json();
        if let Err(err) = self.storage.set_item(FAVORITES_KEY, &serialized, self.context) {
            self.favorites.toggle(id);
            tracing::warn!(error = %err, %id, context = %self.context, "failed to persist favorites");
            return Err(err);
        }
        tracing::info!(%id, favorite = now_member, context = %self.context, "favorite toggled");
        Ok(&self.favorites)
    }

    /// Replaces the in-memory set wholesale without writing to storage.
    ///
    /// Returns `true` if membership changed.
    pub fn replace(&mut self, favorites: FavoriteSet) -> bool {
        if self.favorites == favorites {
            self.favorites = favorites;
            return false;
        }
        self.favorites = favorites;
        true
    }
}

impl std::fmt::Debug for FavoriteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteStore")
            .field("context", &self.context)
            .field("favorites", &self.favorites)
            .finish()
    }
}
