// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cross-context favorites synchronization.
//!
//! Each browsing context subscribes to the favorites slot of the shared storage area. When a
//! sibling context (or another process) rewrites the slot, the new value replaces this context's
//! in-memory set wholesale. There is no merge: the last write observed wins.

use crate::model::FavoriteSet;
use crate::store::{
    ContextId, FavoriteStore, StorageArea, StorageEvent, Subscription, FAVORITES_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Event was for another key or originated from this context.
    Ignored,
    /// Remote value matched the local set.
    Unchanged,
    /// Local set was replaced with a different remote value.
    Replaced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub applied: usize,
    pub changed: bool,
}

/// Subscription of one context to sibling changes of the favorites slot.
#[derive(Debug)]
pub struct CrossContextSync {
    context: ContextId,
    subscription: Subscription,
}

impl CrossContextSync {
    pub fn attach(storage: &dyn StorageArea, context: ContextId) -> Self {
        let subscription = storage.subscribe(FAVORITES_KEY, context);
        Self {
            context,
            subscription,
        }
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Applies one notification to `store`.
    pub fn apply(&self, event: &StorageEvent, store: &mut FavoriteStore) -> SyncOutcome {
        if event.key != FAVORITES_KEY || event.origin == self.context {
            return SyncOutcome::Ignored;
        }

        let remote = FavoriteSet::from_stored(event.new_value.as_deref());
        let count = remote.len();
        if store.replace(remote) {
            tracing::info!(
                context = %self.context,
                origin = %event.origin,
                count,
                "favorites replaced from sibling context"
            );
            SyncOutcome::Replaced
        } else {
            SyncOutcome::Unchanged
        }
    }

    /// Drains queued notifications in arrival order and applies each of them.
    pub fn reconcile_pending(&mut self, store: &mut FavoriteStore) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        while let Some(event) = self.subscription.try_next() {
            match self.apply(&event, store) {
                SyncOutcome::Ignored => {}
                SyncOutcome::Unchanged => summary.applied += 1,
                SyncOutcome::Replaced => {
                    summary.applied += 1;
                    summary.changed = true;
                }
            }
        }
        summary
    }

    /// Waits for the next notification. Returns `None` once detached.
    pub async fn next_change(&mut self) -> Option<StorageEvent> {
        self.subscription.next().await
    }

    /// Releases the storage subscription. Safe to call repeatedly; also happens on drop.
    pub fn detach(&mut self) {
        self.subscription.unsubscribe();
    }
}
