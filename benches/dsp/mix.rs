//! Benchmarks for the dry/wet blend.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::dsp::{mix::apply_dry_wet, saturation::saturate_buffer};

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry = test_signal(size);
        let mut processed = dry.clone();
        saturate_buffer(&mut processed, 1.0);
        let mut wet = processed.clone();

        group.bench_with_input(BenchmarkId::new("parallel_50", size), &size, |b, _| {
            b.iter(|| {
                wet.copy_from_slice(&processed);
                apply_dry_wet(black_box(&dry), black_box(&mut wet), black_box(0.5));
            })
        });
    }

    group.finish();
}
