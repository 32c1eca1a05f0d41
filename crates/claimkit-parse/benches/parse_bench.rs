// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the claimkit-parse crate. Benchmarks the block
// classifier and the normalizer on a synthetic report of realistic shape.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use claimkit_parse::{classify, normalize, parse_runs};

/// Build a synthetic report: headers, bullets, numbered items, paragraphs,
/// separators — the mix a generated inspection report actually contains.
fn synthetic_report(sections: usize) -> String {
    let mut report = String::from("Here is the report you requested.\n\n");
    for i in 0..sections {
        report.push_str("LOSS AND ORIGIN\n");
        report.push_str("The **dwelling** sustained damage to __two__ elevations.\n");
        report.push_str("Observed conditions:\n");
        report.push_str("* Missing shingles on the south slope\n");
        report.push_str("* Cracked fascia boards\n");
        report.push_str(&format!("{}. Schedule contractor inspection\n", i + 1));
        report.push_str("---\n");
    }
    report
}

fn bench_classify(c: &mut Criterion) {
    let report = synthetic_report(50);

    c.bench_function("classify (50 sections)", |b| {
        b.iter(|| black_box(classify(black_box(&report))));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let report = synthetic_report(50);

    c.bench_function("normalize (50 sections)", |b| {
        b.iter(|| black_box(normalize(black_box(&report))));
    });
}

fn bench_parse_runs(c: &mut Criterion) {
    let line = "The **dwelling** sustained __major__ damage to **two** elevations";

    c.bench_function("parse_runs (3 spans)", |b| {
        b.iter(|| black_box(parse_runs(black_box(line))));
    });
}

criterion_group!(benches, bench_classify, bench_normalize, bench_parse_runs);
criterion_main!(benches);
