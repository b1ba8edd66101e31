//! Messages from the audio thread to the UI
//!
//! Everything here is `Copy` and fixed-size so the audio callback can push it
//! through a ring buffer without allocating.

use vt2b_dsp::processor::MAX_CHANNELS;

/// Per-block processor readings, sent once per audio callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeterFrame {
    /// Transient envelope per channel.
    pub envelope: [f32; MAX_CHANNELS],
    /// Gain reduction on the last sample per channel, 0 - 1.
    pub reduction: [f32; MAX_CHANNELS],
    /// Smoothed drive as the audio thread sees it (0 - 10).
    pub drive: f32,
    /// Smoothed mix (0 - 1).
    pub mix: f32,
}

impl MeterFrame {
    /// Largest reduction across channels.
    pub fn max_reduction(&self) -> f32 {
        self.reduction.iter().copied().fold(0.0, f32::max)
    }
}

/// Fixed facts about the running stream, handed to the UI once.
#[derive(Clone, Debug)]
pub struct StreamInfo {
    pub device: String,
    pub sample_rate: f32,
    pub channels: usize,
    pub source: String,
}
