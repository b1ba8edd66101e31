//! Realtime-safe console bus glue.
//!
//! A density-increasing saturation stage, a low-order harmonic generator, a
//! transient shaper and open-loop makeup gain, run per sample under two
//! smoothed controls (Drive, Mix). See [`processor::GlueProcessor`] for the
//! host-facing entry point.

pub mod analysis; // Offline level and harmonic measurement
pub mod dsp;
pub mod params; // Drive / Mix descriptors and lock-free publishing
pub mod processor;

pub use params::{GlueParams, ParamSnapshot};
pub use processor::{ChannelLayout, GlueProcessor};

pub const MAX_BLOCK_SIZE: usize = 2048;
