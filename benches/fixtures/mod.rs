// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use adopta::model::{CatalogEntry, EntryId, FavoriteSet};

const CITIES: &[&str] = &[
    "Bogotá",
    "Medellín",
    "Cali",
    "Barranquilla",
    "Cartagena",
    "Bucaramanga",
    "Pereira",
    "Manizales",
];
const SIZES: &[&str] = &["Pequeño", "Mediano", "Grande"];

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("adopta_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn entries(self) -> usize {
        match self {
            Case::Small => 50,
            Case::Medium => 1_000,
            Case::Large => 20_000,
        }
    }
}

/// Catalog of `case.entries()` dogs cycling through the fixed cities and sizes.
pub fn catalog(case: Case) -> Vec<CatalogEntry> {
    (0..case.entries())
        .map(|idx| {
            let id = idx as i64 + 1;
            CatalogEntry::new(
                EntryId::new(id),
                format!("Dog {id}"),
                CITIES[idx % CITIES.len()],
            )
            .with_size(SIZES[idx % SIZES.len()])
            .with_age((idx % 15) as u32)
            .with_flags(idx % 2 == 0, idx % 3 == 0, idx % 11 == 0)
        })
        .collect()
}

/// Every `stride`-th id of the catalog.
pub fn favorites(case: Case, stride: usize) -> FavoriteSet {
    (0..case.entries())
        .step_by(stride.max(1))
        .map(|idx| EntryId::new(idx as i64 + 1))
        .collect()
}
