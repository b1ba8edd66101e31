//! Benchmarks for the memoryless shapers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::dsp::{harmonics::harmonics, saturation::saturate_buffer};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_saturation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/saturation");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        // The powf dominates; drive only changes the coefficient
        for &(name, drive) in &[("light", 0.2f32), ("full", 1.0)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    saturate_buffer(black_box(&mut buffer), black_box(drive));
                })
            });
        }
    }

    group.finish();
}

pub fn bench_harmonics(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/harmonics");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = x + harmonics(black_box(x), black_box(1.0));
                }
            })
        });
    }

    group.finish();
}
