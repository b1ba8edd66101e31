//! Benchmarks for GlueProcessor block processing.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use vt2b_dsp::{GlueParams, GlueProcessor};

use crate::{test_signal, BLOCK_SIZES, SAMPLE_RATE};

fn processor(drive: f32, mix: f32, block_size: usize) -> GlueProcessor {
    let params = Arc::new(GlueParams::new());
    params.set_drive(drive);
    params.set_mix(mix);

    let mut processor = GlueProcessor::new(params);
    processor.prepare(SAMPLE_RATE, block_size);
    processor
}

pub fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/processor");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut left = input.clone();
        let mut right = input.clone();

        // === MONO ===
        let mut mono = processor(6.0, 100.0, size);
        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                mono.process_block(black_box(&mut [&mut left[..]]));
            })
        });

        // === STEREO ===
        let mut stereo = processor(6.0, 100.0, size);
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                stereo.process_block(black_box(&mut [&mut left[..], &mut right[..]]));
            })
        });

        // === STEREO, PARALLEL MIX ===
        let mut parallel = processor(10.0, 50.0, size);
        group.bench_with_input(BenchmarkId::new("stereo_mix_50", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                parallel.process_block(black_box(&mut [&mut left[..], &mut right[..]]));
            })
        });

        // === INTERLEAVED (device-style buffers) ===
        let mut interleaved_input = Vec::with_capacity(size * 2);
        for &s in &input {
            interleaved_input.extend_from_slice(&[s, s]);
        }
        let mut interleaved = interleaved_input.clone();
        let mut device = processor(6.0, 100.0, size);
        group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
            b.iter(|| {
                interleaved.copy_from_slice(&interleaved_input);
                device.process_interleaved(black_box(&mut interleaved), 2);
            })
        });
    }

    group.finish();
}
