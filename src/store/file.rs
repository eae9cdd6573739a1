// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::area::{
    ContextId, StorageArea, StorageError, StorageEvent, SubscriberRegistry, Subscription,
};

const SLOT_EXTENSION: &str = "json";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

/// Storage area backed by a directory, one `<key>.json` file per slot.
///
/// Several processes may share the directory. Writes from this process notify local subscribers
/// immediately; writes from other processes are discovered by [`FileStorage::poll_external_changes`]
/// (or a [`FileWatcher`]) and delivered with origin [`ContextId::EXTERNAL`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    inner: Arc<FileStorageInner>,
}

#[derive(Debug)]
struct FileStorageInner {
    root: PathBuf,
    durability: WriteDurability,
    registry: SubscriberRegistry,
    // Last value this process wrote or observed per key. Guarded across read/compare and
    // write/record so the poller never mistakes one of our own writes for an external one.
    last_seen: Mutex<HashMap<String, Option<String>>>,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_durability(root, WriteDurability::default())
    }

    pub fn with_durability(root: impl Into<PathBuf>, durability: WriteDurability) -> Self {
        Self {
            inner: Arc::new(FileStorageInner {
                root: root.into(),
                durability,
                registry: SubscriberRegistry::new(),
                last_seen: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    pub fn durability(&self) -> WriteDurability {
        self.inner.durability
    }

    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.inner.root.join(format!("{key}.{SLOT_EXTENSION}")))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.subscriber_count()
    }

    /// Compares every subscribed slot against the last value seen by this process and publishes
    /// an external change for each difference.
    ///
    /// Returns the number of changed slots.
    pub fn poll_external_changes(&self) -> usize {
        let mut changed = 0;
        for key in self.inner.registry.subscribed_keys() {
            let path = match self.slot_path(&key) {
                Ok(path) => path,
                Err(_) => continue,
            };

            let event = {
                let mut last_seen = self.inner.lock_last_seen();
                let current = match read_slot(&path) {
                    Ok(current) => current,
                    Err(err) => {
                        tracing::warn!(error = %err, key, "failed to poll storage slot");
                        continue;
                    }
                };
                let previous = last_seen.get(&key).cloned().flatten();
                if last_seen.contains_key(&key) && previous == current {
                    continue;
                }
                last_seen.insert(key.clone(), current.clone());
                StorageEvent {
                    key: key.clone(),
                    old_value: previous,
                    new_value: current,
                    origin: ContextId::EXTERNAL,
                }
            };

            tracing::debug!(key = %event.key, "external storage change detected");
            self.inner.registry.publish(&event);
            changed += 1;
        }
        changed
    }

    /// Polls for external changes every `interval` on the current tokio runtime until the
    /// returned watcher is dropped.
    pub fn spawn_watcher(&self, interval: Duration) -> FileWatcher {
        let storage = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let storage = storage.clone();
                if tokio::task::spawn_blocking(move || storage.poll_external_changes())
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
        FileWatcher { handle }
    }
}

impl StorageArea for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        read_slot(&path)
    }

    fn set_item(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let event = {
            let mut last_seen = self.inner.lock_last_seen();
            let old_value = read_slot(&path)?;
            if old_value.as_deref() == Some(value) {
                // Another process may have stored this value since the last poll. Recording it
                // as seen hides it from the poller, so report it here.
                let previous = last_seen.insert(key.to_owned(), old_value.clone());
                match previous {
                    Some(previous) if previous != old_value => StorageEvent {
                        key: key.to_owned(),
                        old_value: previous,
                        new_value: old_value,
                        origin: ContextId::EXTERNAL,
                    },
                    _ => return Ok(()),
                }
            } else {
                write_atomic(&self.inner.root, &path, value.as_bytes(), self.inner.durability)?;
                last_seen.insert(key.to_owned(), Some(value.to_owned()));
                StorageEvent {
                    key: key.to_owned(),
                    old_value,
                    new_value: Some(value.to_owned()),
                    origin,
                }
            }
        };
        self.inner.registry.publish(&event);
        Ok(())
    }

    fn remove_item(&self, key: &str, origin: ContextId) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let event = {
            let mut last_seen = self.inner.lock_last_seen();
            let Some(old_value) = read_slot(&path)? else {
                // Removed by another process since the last poll.
                if let Some(Some(previous)) = last_seen.insert(key.to_owned(), None) {
                    drop(last_seen);
                    self.inner.registry.publish(&StorageEvent {
                        key: key.to_owned(),
                        old_value: Some(previous),
                        new_value: None,
                        origin: ContextId::EXTERNAL,
                    });
                }
                return Ok(());
            };
            fs::remove_file(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            last_seen.insert(key.to_owned(), None);
            StorageEvent {
                key: key.to_owned(),
                old_value: Some(old_value),
                new_value: None,
                origin,
            }
        };
        self.inner.registry.publish(&event);
        Ok(())
    }

    fn subscribe(&self, key: &str, context: ContextId) -> Subscription {
        // Baseline the slot so the first poll only reports changes made after subscribing.
        if let Ok(path) = self.slot_path(key) {
            let mut last_seen = self.inner.lock_last_seen();
            if !last_seen.contains_key(key) {
                if let Ok(current) = read_slot(&path) {
                    last_seen.insert(key.to_owned(), current);
                }
            }
        }
        self.inner.registry.subscribe(key, context)
    }
}

impl FileStorageInner {
    fn lock_last_seen(&self) -> MutexGuard<'_, HashMap<String, Option<String>>> {
        self.last_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Background poller created by [`FileStorage::spawn_watcher`]; stops when dropped.
#[derive(Debug)]
pub struct FileWatcher {
    handle: tokio::task::JoinHandle<()>,
}

impl FileWatcher {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// Slot path validation and atomic filesystem writes.
include!("file/helpers.rs");
