// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side persistence.
//!
//! Storage areas (in-memory or directory-backed) hold string slots shared by every browsing
//! context of the client; the favorite store persists the favorite set in one of those slots.

pub mod area;
pub mod favorites;
pub mod file;
pub mod memory;

pub use area::{
    ContextId, StorageArea, StorageError, StorageEvent, SubscriberRegistry, Subscription,
};
pub use favorites::{FavoriteStore, FAVORITES_KEY};
pub use file::{FileStorage, FileWatcher, WriteDurability};
pub use memory::MemoryStorage;
