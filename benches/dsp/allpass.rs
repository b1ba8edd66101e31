//! Benchmarks for the phase all-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::dsp::allpass::PhaseAllpass;

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/allpass");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut buffer = input.clone();
        let mut allpass = PhaseAllpass::new(SAMPLE_RATE);

        group.bench_with_input(BenchmarkId::new("80hz", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                allpass.process_buffer(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
