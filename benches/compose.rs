// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Livepen-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Livepen and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use livepen::compose::compose_buffers;
use livepen::model::templates::DEFAULT_TITLE;
use livepen::share::{decode_share, encode_share};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `compose.document`, `share.encode`, `share.decode`
// - Case IDs are `small`, `medium`, `large`.
fn benches_compose(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("compose.document");

        for case in fixtures::CASES {
            let pen = fixtures::pen(case);
            let bytes = pen.iter().map(|buffer| buffer.text().len() as u64).sum();
            group.throughput(Throughput::Bytes(bytes));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let doc = compose_buffers(black_box(&pen), DEFAULT_TITLE);
                    black_box(fixtures::checksum(&doc))
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("share.encode");

        for case in fixtures::CASES {
            let pen = fixtures::pen(case);
            group.bench_function(case.id(), move |b| {
                b.iter(|| black_box(encode_share(black_box(&pen), DEFAULT_TITLE)))
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("share.decode");

        for case in fixtures::CASES {
            let encoded = encode_share(&fixtures::pen(case), DEFAULT_TITLE);
            group.throughput(Throughput::Bytes(encoded.len() as u64));
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let shared = decode_share(black_box(&encoded)).expect("decode_share");
                    black_box(shared.markup.map(|text| text.len()))
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_compose
}
criterion_main!(benches);
