//! Benchmarks for tripdoc pagination and PDF writing.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic captures of typical itinerary sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use tripdoc::model::{PageGeometry, SourceImage};
use tripdoc::paginate::{paginate, plan};
use tripdoc::writer::{write_pdf, WriteOptions};

/// Creates a capture with alternating bands, like cards on a white page.
fn create_capture(width: u32, height: u32) -> SourceImage {
    let mut pixels = RgbaImage::new(width, height);
    for (_, y, px) in pixels.enumerate_pixels_mut() {
        *px = if (y / 120) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([229, 231, 235, 255])
        };
    }
    SourceImage::new(pixels).expect("non-empty capture")
}

fn bench_plan(c: &mut Criterion) {
    let geometry = PageGeometry::a4();
    c.bench_function("plan_100k_rows", |b| {
        b.iter(|| plan(black_box(1600), black_box(100_000), &geometry))
    });
}

fn bench_paginate(c: &mut Criterion) {
    let geometry = PageGeometry::a4();
    let mut group = c.benchmark_group("paginate");

    for height in [800u32, 3_000, 10_000] {
        let capture = create_capture(1600, height);
        group.bench_with_input(BenchmarkId::from_parameter(height), &capture, |b, capture| {
            b.iter(|| paginate(black_box(capture), &geometry))
        });
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let geometry = PageGeometry::a4();
    let doc = paginate(&create_capture(1600, 6_000), &geometry).expect("paginate");
    let mut group = c.benchmark_group("write_pdf");
    group.sample_size(10);

    group.bench_function("parallel", |b| {
        b.iter(|| write_pdf(black_box(&doc), &WriteOptions::new()))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| write_pdf(black_box(&doc), &WriteOptions::new().sequential()))
    });

    group.finish();
}

criterion_group!(benches, bench_plan, bench_paginate, bench_write);
criterion_main!(benches);
