// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the openconvert-convert crate. Currently
// benchmarks text-to-PDF rendering on a synthetic multi-page document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use openconvert_convert::text::render_text_pdf;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark text-to-PDF rendering on a 400-line synthetic document.
///
/// 400 lines at a 14pt line height span several A4 pages, so this exercises
/// the explicit pagination path as well as the per-line op emission — the
/// realistic hot path for converting a log file or report.
fn bench_text_to_pdf(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..400 {
        text.push_str(&format!(
            "line {i}: the quick brown fox jumps over the lazy dog\n"
        ));
    }

    c.bench_function("render_text_pdf (400 lines)", |b| {
        b.iter(|| {
            let bytes = render_text_pdf("bench", black_box(&text));
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_text_to_pdf);
criterion_main!(benches);
