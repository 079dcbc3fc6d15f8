//! Criterion benchmarks for eidtext critical paths
//!
//! Benchmarks the per-frame operations:
//! - Tokenizer: markup splitting
//! - Resolver: tag resolution against the full provider chain
//! - Layout: line fitting and string width
//! - Parser: JSON5 pack stream parsing
//! - Color: CSS color parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eidtext::color::{parse_color, KColor};
use eidtext::font::str_width;
use eidtext::layout::LineFitter;
use eidtext::parser::parse_stream;
use eidtext::tokenizer::tokenize;
use eidtext::Eid;
use std::io::Cursor;

// =============================================================================
// Test Data Generators
// =============================================================================

/// A description with `n` bulletpoints mixing icons, colors and plain words
fn make_description(n: usize) -> String {
    (0..n)
        .map(|i| match i % 4 {
            0 => "↑ {{Heart}} +1 Health up and a full heart".to_string(),
            1 => "{{ColorRed}}Damage{{CR}} multiplier x1.5 for the current room".to_string(),
            2 => format!("Spawns {{{{Collectible{}}}}} when picked up", i),
            _ => "Crafting: {{Crafting3}}{{Crafting3}}{{Crafting1}} unknown {{Missing}} tag".to_string(),
        })
        .collect::<Vec<_>>()
        .join("#")
}

fn make_pack(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                r#"{{"type": "description", "class": "collectible", "id": {}, "name": "Item {}", "description": "↑ {{{{Heart}}}} +{} Health"}}"#,
                i, i, i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn engine() -> Eid {
    let mut eid = Eid::new();
    for i in 0..64 {
        eid.catalog.insert(eidtext::models::EntityClass::Collectible, i, "Bench Item", None);
    }
    eid
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    for size in [4, 16, 64].iter() {
        let text = make_description(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", size), &text, |b, text| {
            b.iter(|| tokenize(black_box(text)).count())
        });
    }

    group.bench_function("tokenize_plain", |b| {
        let text = "no markup at all ".repeat(50);
        b.iter(|| tokenize(black_box(&text)).count())
    });

    group.finish();
}

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");
    let eid = engine();

    for size in [4, 16, 64].iter() {
        let text = make_description(*size);
        group.bench_with_input(BenchmarkId::new("resolve", size), &text, |b, text| {
            b.iter(|| eid.resolve_markup(black_box(text), KColor::WHITE))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let eid = engine();

    for size in [4, 16, 64].iter() {
        let text = make_description(*size).replace('#', "\n");
        let runs = eid.resolve_markup(&text, KColor::WHITE);
        group.bench_with_input(BenchmarkId::new("fit", size), &runs, |b, runs| {
            b.iter(|| LineFitter::default().fit(black_box(runs), 130))
        });
    }

    let text = make_description(16);
    group.bench_function("str_width", |b| b.iter(|| str_width(black_box(&text))));
    group.bench_function("get_str_width", |b| b.iter(|| eid.get_str_width(black_box(&text))));

    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for count in [10, 100].iter() {
        let content = make_pack(*count);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_function(format!("parse_stream_{}", count), |b| {
            b.iter(|| parse_stream(Cursor::new(black_box(content.as_bytes()))))
        });
    }

    group.finish();
}

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("parse_hex_6", |b| b.iter(|| parse_color(black_box("#FF0000"))));
    group.bench_function("parse_rgb", |b| b.iter(|| parse_color(black_box("rgb(255, 0, 0)"))));
    group.bench_function("parse_named", |b| b.iter(|| parse_color(black_box("red"))));

    group.finish();
}

criterion_group!(benches, bench_tokenizer, bench_resolver, bench_layout, bench_parser, bench_color);
criterion_main!(benches);
