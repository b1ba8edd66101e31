//! Benchmarks for the transient shaper.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::dsp::transient::TransientShaper;

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_transient(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/transient");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();

        // Coefficients are re-derived every sample, so this includes two exp() calls
        let mut shaper = TransientShaper::new();
        group.bench_with_input(BenchmarkId::new("shape", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(input.iter()) {
                    *out = shaper.shape(black_box(x), black_box(1.0), SAMPLE_RATE);
                }
            })
        });
    }

    group.finish();
}
