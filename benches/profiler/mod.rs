// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

// Knobs: LIVEPEN_PROFILE_FREQ, LIVEPEN_BENCH_SAMPLES, LIVEPEN_BENCH_WARMUP_SECS,
// LIVEPEN_BENCH_MEASURE_SECS. Unparseable values fall back to the default.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let frequency: i32 = env_or("LIVEPEN_PROFILE_FREQ", 99).clamp(1, 1000);
    let samples: usize = env_or("LIVEPEN_BENCH_SAMPLES", 50).clamp(10, 500);
    let warmup: u64 = env_or("LIVEPEN_BENCH_WARMUP_SECS", 2).clamp(1, 30);
    let measure: u64 = env_or("LIVEPEN_BENCH_MEASURE_SECS", 4).clamp(1, 60);

    Criterion::default()
        .sample_size(samples)
        .warm_up_time(Duration::from_secs(warmup))
        .measurement_time(Duration::from_secs(measure))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
