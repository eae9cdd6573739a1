// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::area::{
    ContextId, StorageArea, StorageError, StorageEvent, SubscriberRegistry, Subscription,
};

/// In-process storage area shared by several contexts (e.g. tabs hosted by one process).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    registry: SubscriberRegistry,
    writes: Mutex<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes that changed a slot. Used to check that a toggle persists exactly once.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscriber_count()
    }

    fn record_write(&self) {
        let mut writes = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        *writes = writes.wrapping_add(1);
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str, origin: ContextId) -> Result<(), StorageError> {
        let event = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            if slots.get(key).is_some_and(|existing| existing == value) {
                return Ok(());
            }
            let old_value = slots.insert(key.to_owned(), value.to_owned());
            StorageEvent {
                key: key.to_owned(),
                old_value,
                new_value: Some(value.to_owned()),
                origin,
            }
        };
        self.record_write();
        self.registry.publish(&event);
        Ok(())
    }

    fn remove_item(&self, key: &str, origin: ContextId) -> Result<(), StorageError> {
        let event = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(old_value) = slots.remove(key) else {
                return Ok(());
            };
            StorageEvent {
                key: key.to_owned(),
                old_value: Some(old_value),
                new_value: None,
                origin,
            }
        };
        self.record_write();
        self.registry.publish(&event);
        Ok(())
    }

    fn subscribe(&self, key: &str, context: ContextId) -> Subscription {
        self.registry.subscribe(key, context)
    }
}
