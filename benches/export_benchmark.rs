//! Benchmarks for parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic report of repeating sections.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prd_export::{parse, strip_inline, Metadata, RenderOptions};

/// Creates a synthetic report with the given number of sections.
fn create_test_report(sections: usize) -> String {
    let mut text = String::from("# Product Requirements\n\n");

    for i in 0..sections {
        text.push_str(&format!("## {}. Feature area\n", i + 1));
        text.push_str(
            "Users need a **fast** way to capture tasks, share them with *their* team \
             and see progress at a glance. See [the brief](https://example.com) for `details`.\n",
        );
        text.push_str("- Capture in one tap\n- Sync across devices\n- Works offline\n");
        text.push_str("1. Draft\n2. Review\n3. Ship\n");
        text.push_str("**Acceptance:** all flows covered by tests\n---\n\n");
    }

    text
}

/// Benchmark line classification at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for sections in [10, 100, 1000].iter() {
        let text = create_test_report(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| parse(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark inline style stripping.
fn bench_strip(c: &mut Criterion) {
    let line = "Users need a **fast** way to *capture* tasks with `code` and [links](https://x.y).";

    c.bench_function("strip_inline", |b| {
        b.iter(|| strip_inline(black_box(line)));
    });
}

/// Benchmark both document renderers.
fn bench_rendering(c: &mut Criterion) {
    let doc = parse(&create_test_report(50));
    let meta = Metadata::new("TaskFlow", "1.0");
    let options = RenderOptions::default();

    c.bench_function("render_pdf_50_sections", |b| {
        b.iter(|| prd_export::render::to_pdf(black_box(&doc), &meta, &options).unwrap());
    });

    c.bench_function("render_docx_50_sections", |b| {
        b.iter(|| prd_export::render::to_docx(black_box(&doc), &meta, &options).unwrap());
    });
}

criterion_group!(benches, bench_parsing, bench_strip, bench_rendering);
criterion_main!(benches);
