// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One browsing context: the state behind a single open view of the catalog.
//!
//! The context owns its favorite store and sync handle, the last fetched catalog, the filter
//! criteria and the detail view. Every change to an input of the rendered projection bumps
//! [`BrowsingContext::rev`], so a host can redraw only when something actually changed.

use std::sync::Arc;

use crate::client::{CatalogClient, CatalogError};
use crate::filter::{filter_catalog, DerivedCounts, FilterCriteria};
use crate::model::{CatalogEntry, EntryId, FavoriteSet};
use crate::store::{ContextId, FavoriteStore, StorageArea, StorageError};
use crate::sync::{CrossContextSync, ReconcileSummary, SyncOutcome};

/// Banner shown while the catalog could not be loaded.
pub const CONNECTION_BANNER: &str =
    "Could not connect to the catalog server. Check that the backend is running.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl CatalogStatus {
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Closed,
    Loading(EntryId),
    Loaded(CatalogEntry),
    NotFound(EntryId),
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug)]
pub struct BrowsingContext {
    store: FavoriteStore,
    sync: CrossContextSync,
    catalog: Vec<CatalogEntry>,
    status: CatalogStatus,
    criteria: FilterCriteria,
    detail: DetailState,
    catalog_request: u64,
    rev: u64,
}

impl BrowsingContext {
    /// Opens a new context over `storage` with a fresh [`ContextId`].
    pub fn open(storage: Arc<dyn StorageArea>) -> Self {
        Self::open_as(storage, ContextId::next())
    }

    pub fn open_as(storage: Arc<dyn StorageArea>, context: ContextId) -> Self {
        // Subscribe before loading so a sibling write between the two is not lost.
        let sync = CrossContextSync::attach(storage.as_ref(), context);
        let store = FavoriteStore::load(storage, context);
        tracing::info!(%context, favorites = store.len(), "browsing context opened");
        Self {
            store,
            sync,
            catalog: Vec::new(),
            status: CatalogStatus::Idle,
            criteria: FilterCriteria::default(),
            detail: DetailState::Closed,
            catalog_request: 0,
            rev: 0,
        }
    }

    pub fn context(&self) -> ContextId {
        self.store.context()
    }

    /// Revision of the projection inputs (catalog, criteria, favorites, detail).
    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.catalog.iter().find(|entry| entry.id() == id)
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn favorites(&self) -> &FavoriteSet {
        self.store.favorites()
    }

    pub fn is_favorite(&self, id: EntryId) -> bool {
        self.store.contains(id)
    }

    pub fn filtered(&self) -> Vec<&CatalogEntry> {
        filter_catalog(&self.catalog, &self.criteria, self.store.favorites())
    }

    pub fn counts(&self) -> DerivedCounts {
        DerivedCounts::compute(&self.catalog, &self.criteria, self.store.favorites())
    }

    /// Marks a catalog fetch as in flight and returns its request number.
    pub fn begin_catalog_fetch(&mut self) -> u64 {
        self.catalog_request = self.catalog_request.wrapping_add(1);
        self.status = CatalogStatus::Loading;
        self.bump();
        self.catalog_request
    }

    /// Applies the outcome of catalog request `request`.
    ///
    /// Results of superseded requests are still applied. On failure the previous catalog is
    /// kept and the connection banner is raised.
    pub fn apply_catalog_result(
        &mut self,
        request: u64,
        result: Result<Vec<CatalogEntry>, CatalogError>,
    ) {
        if request != self.catalog_request {
            tracing::debug!(
                request,
                latest = self.catalog_request,
                "applying superseded catalog result"
            );
        }
        match result {
            Ok(catalog) => {
                tracing::info!(entries = catalog.len(), "catalog loaded");
                self.catalog = catalog;
                self.status = CatalogStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = %err, "catalog fetch failed");
                self.status = CatalogStatus::Failed(CONNECTION_BANNER.to_owned());
            }
        }
        self.bump();
    }

    pub fn open_detail(&mut self, id: EntryId) {
        self.detail = DetailState::Loading(id);
        self.bump();
    }

    /// Applies a detail fetch outcome. Returns `false` when the result was dropped because the
    /// detail view has since moved to another entry or closed.
    pub fn apply_detail_result(
        &mut self,
        id: EntryId,
        result: Result<CatalogEntry, CatalogError>,
    ) -> bool {
        if self.detail != DetailState::Loading(id) {
            tracing::debug!(%id, "dropping stale detail result");
            return false;
        }
        self.detail = match result {
            Ok(entry) => DetailState::Loaded(entry),
            Err(err) => {
                if err.is_connection() {
                    tracing::warn!(%id, error = %err, "detail fetch failed");
                } else {
                    tracing::info!(%id, "entry not found");
                }
                DetailState::NotFound(id)
            }
        };
        self.bump();
        true
    }

    pub fn close_detail(&mut self) {
        if self.detail.is_open() {
            self.detail = DetailState::Closed;
            self.bump();
        }
    }

    /// Returns `true` if the criteria changed.
    pub fn set_city_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.criteria.city_text == text {
            return false;
        }
        self.criteria.city_text = text;
        self.bump();
        true
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) -> bool {
        if self.criteria.favorites_only == favorites_only {
            return false;
        }
        self.criteria.favorites_only = favorites_only;
        self.bump();
        true
    }

    /// Flips membership of `id` and persists it. Returns whether `id` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, id: EntryId) -> Result<bool, StorageError> {
        let now_member = self.store.toggle(id)?.contains(id);
        self.bump();
        Ok(now_member)
    }

    /// Applies queued sibling changes to the favorite set.
    pub fn reconcile(&mut self) -> ReconcileSummary {
        let summary = self.sync.reconcile_pending(&mut self.store);
        if summary.changed {
            self.bump();
        }
        summary
    }

    /// Waits for one sibling change and applies it. Returns `None` once detached.
    pub async fn next_sibling_change(&mut self) -> Option<SyncOutcome> {
        let event = self.sync.next_change().await?;
        let outcome = self.sync.apply(&event, &mut self.store);
        if outcome == SyncOutcome::Replaced {
            self.bump();
        }
        Some(outcome)
    }

    /// Stops receiving sibling changes. Also happens on drop.
    pub fn detach(&mut self) {
        self.sync.detach();
    }

    pub async fn load_catalog<C: CatalogClient>(&mut self, client: &C) {
        let request = self.begin_catalog_fetch();
        let result = client.fetch_catalog().await;
        self.apply_catalog_result(request, result);
    }

    pub async fn load_detail<C: CatalogClient>(&mut self, client: &C, id: EntryId) {
        self.open_detail(id);
        let result = client.fetch_entry(id).await;
        self.apply_detail_result(id, result);
    }
}
