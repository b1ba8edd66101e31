//! Benchmarks for individual glue stages.

mod allpass;
mod mix;
mod shaping;
mod smoothing;
mod transient;

pub use allpass::bench_allpass;
pub use mix::bench_mix;
pub use shaping::{bench_harmonics, bench_saturation};
pub use smoothing::bench_smoothing;
pub use transient::bench_transient;
