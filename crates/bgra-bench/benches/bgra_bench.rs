//! Benchmarks for BGRA-RS operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use bgra_core::{PixelBuffer, Rect};
use bgra_ops::resize_filter::ResizeFilter;
use bgra_ops::{ResizeMethod, blur, hsl, parallel, resize, resize_subset, transform};

fn test_image(w: u32, h: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(w, h, true);
    for y in 0..h {
        for x in 0..w {
            let a = ((x + y) % 128 + 128) as u8;
            let c = ((x * 31 + y * 17) % a as u32) as u8;
            img.set_pixel(x, y, [c, c / 2, c / 3, a]);
        }
    }
    img
}

/// Benchmark weight table construction.
fn bench_filter_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_filter");

    for (src, dst) in [(4096, 256), (256, 4096), (1920, 1280)] {
        let id = format!("{src}->{dst}");
        group.bench_with_input(BenchmarkId::new("lanczos3", &id), &(src, dst), |b, &(s, d)| {
            b.iter(|| ResizeFilter::new(ResizeMethod::Lanczos3, black_box(s), d, 0, d))
        });
    }

    group.finish();
}

/// Benchmark full resizes.
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    group.sample_size(20);

    let src = test_image(1024, 768);
    for method in [ResizeMethod::Box, ResizeMethod::Lanczos3] {
        for (w, h) in [(512, 384), (256, 192), (1600, 1200)] {
            group.throughput(Throughput::Elements(w as u64 * h as u64));
            group.bench_with_input(
                BenchmarkId::new(method.name(), format!("{w}x{h}")),
                &(w, h),
                |b, &(w, h)| b.iter(|| resize(black_box(src.view()), method, w, h)),
            );
        }
    }

    group.bench_function("lanczos3_subset_256", |b| {
        b.iter(|| {
            resize_subset(
                black_box(src.view()),
                ResizeMethod::Lanczos3,
                1600,
                1200,
                Rect::new(600, 400, 256, 256),
            )
        })
    });

    group.bench_function("parallel_lanczos3_1600x1200", |b| {
        b.iter(|| parallel::resize(black_box(src.view()), ResizeMethod::Lanczos3, 1600, 1200))
    });

    group.finish();
}

/// Benchmark the per-pixel helpers.
fn bench_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("helpers");
    let src = test_image(256, 256);

    for amount in [1, 3] {
        group.bench_with_input(BenchmarkId::new("blurred", amount), &amount, |b, &n| {
            b.iter(|| blur::blurred(black_box(src.view()), n))
        });
    }

    group.bench_function("downsample_by_two", |b| {
        b.iter(|| transform::downsample_by_two(black_box(src.view())))
    });

    group.bench_function("hsl_shift", |b| {
        b.iter(|| hsl::shifted(black_box(src.view()), hsl::Hsl::new(0.3, 0.7, 0.4)))
    });

    group.finish();
}

criterion_group!(benches, bench_filter_build, bench_resize, bench_helpers);
criterion_main!(benches);
