// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Adopta-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Adopta and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use adopta::filter::{filter_catalog, DerivedCounts, FilterCriteria};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

mod fixtures;
mod profiler;

use fixtures::Case;

// Group and case ids stay stable so results remain comparable across refactors.
fn benches_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter.project");

    for (label, case) in [
        ("small", Case::Small),
        ("medium", Case::Medium),
        ("large", Case::Large),
    ] {
        let catalog = fixtures::catalog(case);
        let favorites = fixtures::favorites(case, 7);

        let unfiltered = FilterCriteria::default();
        group.bench_function(format!("unfiltered_{label}"), |b| {
            b.iter(|| {
                filter_catalog(black_box(&catalog), black_box(&unfiltered), black_box(&favorites))
                    .len()
            })
        });

        let city = FilterCriteria::new("MEDEL", false);
        group.bench_function(format!("city_{label}"), |b| {
            b.iter(|| {
                filter_catalog(black_box(&catalog), black_box(&city), black_box(&favorites)).len()
            })
        });

        let combined = FilterCriteria::new("bogo", true);
        group.bench_function(format!("city_and_favorites_{label}"), |b| {
            b.iter(|| {
                filter_catalog(black_box(&catalog), black_box(&combined), black_box(&favorites))
                    .len()
            })
        });

        group.bench_function(format!("counts_{label}"), |b| {
            b.iter(|| {
                DerivedCounts::compute(
                    black_box(&catalog),
                    black_box(&combined),
                    black_box(&favorites),
                )
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_filter
}
criterion_main!(benches);
