// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Adopta: adoptable-dog catalog client with favorites shared across open sessions.
//!
//! Favorites live in a [`store::StorageArea`] slot; every [`context::BrowsingContext`] over the
//! same area sees the others' toggles through [`sync::CrossContextSync`]. The catalog comes from
//! a [`client::CatalogClient`] and is projected through [`filter`].

pub mod adoption;
pub mod client;
pub mod config;
pub mod context;
pub mod demo;
pub mod filter;
pub mod logging;
pub mod model;
pub mod store;
pub mod sync;
pub mod tui;
