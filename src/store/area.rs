// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Storage area contract shared by all backends.
//!
//! A storage area is a string key/value slot store visible to every browsing context of the same
//! client. Writes carry the [`ContextId`] of the writer so change notifications can be routed to
//! every *other* subscribed context.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::mpsc;

/// Identity of one browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

impl ContextId {
    /// Origin used for changes observed outside this process (another process wrote the slot).
    pub const EXTERNAL: ContextId = ContextId(0);

    /// Allocates a process-unique context id.
    pub fn next() -> Self {
        Self(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_external(self) -> bool {
        self == Self::EXTERNAL
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external() {
            f.write_str("external")
        } else {
            write!(f, "ctx-{}", self.0)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid storage key {key:?}")]
    InvalidKey { key: String },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}

/// Notification that a slot changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub origin: ContextId,
}

pub trait StorageArea: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`. Writing the value already stored writes nothing and reports no
    /// change from `origin`; a backend shared with other processes may still report that value
    /// as an external change it had not observed yet.
    fn set_item(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str, origin: ContextId) -> Result<(), StorageError>;

    /// Subscribes `context` to changes of `key` made by any other context.
    fn subscribe(&self, key: &str, context: ContextId) -> Subscription;
}

#[derive(Debug)]
struct Subscriber {
    key: String,
    context: ContextId,
    tx: mpsc::UnboundedSender<StorageEvent>,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    subscribers: BTreeMap<u64, Subscriber>,
}

/// Fan-out of storage events to subscribed contexts.
#[derive(Debug, Clone, Default)]
pub struct SubscriberRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, key: &str, context: ContextId) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = state.next_id;
        state.next_id = state.next_id.wrapping_add(1);
        state.subscribers.insert(
            id,
            Subscriber {
                key: key.to_owned(),
                context,
                tx,
            },
        );
        tracing::debug!(key, %context, subscription = id, "storage subscription added");

        Subscription {
            id,
            key: key.to_owned(),
            context,
            registry: Arc::downgrade(&self.state),
            rx,
            active: true,
        }
    }

    /// Delivers `event` to every subscriber of its key except the originating context.
    ///
    /// Returns the number of contexts notified.
    pub fn publish(&self, event: &StorageEvent) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        let mut closed = Vec::new();
        for (id, subscriber) in &state.subscribers {
            if subscriber.key != event.key || subscriber.context == event.origin {
                continue;
            }
            if subscriber.tx.send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(*id);
            }
        }
        for id in closed {
            state.subscribers.remove(&id);
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).subscribers.len()
    }

    /// Keys with at least one live subscriber.
    pub fn subscribed_keys(&self) -> Vec<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> =
            state.subscribers.values().map(|subscriber| subscriber.key.clone()).collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

/// Handle for one storage subscription.
///
/// Dropping the handle releases the subscription. [`Subscription::unsubscribe`] may be called any
/// number of times.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    key: String,
    context: ContextId,
    registry: Weak<Mutex<RegistryState>>,
    rx: mpsc::UnboundedReceiver<StorageEvent>,
    active: bool,
}

impl Subscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Next queued event, without waiting.
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        if !self.active {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Waits for the next event. Returns `None` once unsubscribed or the area is gone.
    pub async fn next(&mut self) -> Option<StorageEvent> {
        if !self.active {
            return None;
        }
        self.rx.recv().await
    }

    pub fn unsubscribe(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.rx.close();
        if let Some(state) = self.registry.upgrade() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.subscribers.remove(&self.id);
        }
        tracing::debug!(
            key = %self.key,
            context = %self.context,
            subscription = self.id,
            "storage subscription released"
        );
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
