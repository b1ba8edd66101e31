//! Full-processor benchmarks.
//!
//! These run GlueProcessor the way a host does: one call per block, controls
//! read from the shared registry.

mod processor;

pub use processor::bench_processor;
