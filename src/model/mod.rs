// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Catalog entries come from the remote service and are immutable on the client; the favorite set
//! is the only client-owned state.

pub mod entry;
pub mod favorites;

pub use entry::{CatalogEntry, EntryId, ParseEntryIdError};
pub use favorites::{FavoriteSet, FavoritesParseError};
