//! Benchmarks for the linear parameter ramp.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::dsp::smoothing::SmoothedValue;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smoothing");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Ramping: target flips every block so the ramp never settles
        let mut smoother = SmoothedValue::new(0.0);
        smoother.reset(SAMPLE_RATE, 0.02);
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                flip = !flip;
                smoother.set_target(if flip { 10.0 } else { 0.0 });
                for out in buffer.iter_mut() {
                    *out = smoother.next_value();
                }
                black_box(&buffer);
            })
        });

        // Settled: the common case between control moves
        let mut smoother = SmoothedValue::new(5.0);
        smoother.reset(SAMPLE_RATE, 0.02);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = smoother.next_value();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
