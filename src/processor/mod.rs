//! The glue processor: parameter smoothing plus the per-channel chain.

/*
Signal Chain Orchestrator
=========================

GlueProcessor is what a host talks to. It owns:

  - two SmoothedValues (drive in its native 0 - 10 range, mix in 0 - 1)
  - two ChannelStrips, each with its own transient envelope
  - an Arc to the shared GlueParams, read once per block

Block Flow
----------

    process_block(channels)
      │
      ├─ read drive, mix from GlueParams          (once per block)
      ├─ drive_smoother.set_target(drive)
      ├─ mix_smoother.set_target(mix / 100)
      │
      └─ for each sample index i:
           drive = drive_smoother.next_value()
           mix   = mix_smoother.next_value()
           frame = { drive / 10, mix, sample_rate }
           left[i]  = strips[0].process(left[i],  frame)
           right[i] = strips[1].process(right[i], frame)   (stereo only)

Samples are walked strictly in order: each one advances both smoothers and
that channel's envelope, so sample i+1 depends on sample i. The two channels
never read each other's state.

Mono
----

With a single channel only the left strip runs. The right strip (and its
envelope) still exists, so switching layouts on the next prepare() needs no
reallocation, but nothing touches it.

Realtime Rules
--------------

process_* never allocates, locks, or logs. prepare() and release() are called
off the audio path by hosts and may log when the `tracing` feature is on.
*/

mod channel;
mod layout;

pub use channel::{ChannelStrip, FrameParams};
pub use layout::ChannelLayout;

use std::sync::Arc;

use crate::{
    dsp::{mix::percent_to_mix, smoothing::SmoothedValue},
    params::{GlueParams, DRIVE, MIX},
};

/// Ramp time for both controls, in seconds.
pub const SMOOTHING_TIME: f32 = 0.02;
/// Sample rate assumed until the first prepare().
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
/// Channels the processor can carry.
pub const MAX_CHANNELS: usize = 2;

/// Density saturation / glue processor.
pub struct GlueProcessor {
    params: Arc<GlueParams>,
    drive: SmoothedValue,
    mix: SmoothedValue,
    strips: [ChannelStrip; MAX_CHANNELS],
    sample_rate: f32,
    max_block_size: usize,
}

impl GlueProcessor {
    /// Display name.
    pub const NAME: &'static str = "VT-2B Black";

    /// Create a processor reading from a shared parameter registry.
    pub fn new(params: Arc<GlueParams>) -> Self {
        let mut processor = Self {
            params,
            drive: SmoothedValue::new(DRIVE.default),
            mix: SmoothedValue::new(percent_to_mix(MIX.default)),
            strips: [ChannelStrip::new(), ChannelStrip::new()],
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: crate::MAX_BLOCK_SIZE,
        };
        processor.prepare(DEFAULT_SAMPLE_RATE, crate::MAX_BLOCK_SIZE);
        processor
    }

    /// (Re)start the stream: configure smoothing for `sample_rate`, zero envelopes.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        self.drive.reset(sample_rate, SMOOTHING_TIME);
        self.mix.reset(sample_rate, SMOOTHING_TIME);

        for strip in &mut self.strips {
            strip.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, max_block_size, "glue processor prepared");
    }

    /// Teardown hook. Holds no resources that need freeing.
    pub fn release(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("glue processor released");
    }

    /// Process planar channels in place, reading controls from the registry.
    ///
    /// `channels` must hold one or two slices of equal length.
    pub fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        let drive = self.params.drive.get();
        let mix = self.params.mix.get();
        self.process_block_with(drive, mix, channels);
    }

    /// Process planar channels with explicit raw control values
    /// (drive 0 - 10, mix 0 - 100 %).
    pub fn process_block_with(&mut self, drive: f32, mix_percent: f32, channels: &mut [&mut [f32]]) {
        debug_assert!(
            (1..=MAX_CHANNELS).contains(&channels.len()),
            "expected 1 or 2 channels, got {}",
            channels.len()
        );
        self.set_targets(drive, mix_percent);

        match channels {
            [mono] => {
                for sample in mono.iter_mut() {
                    let frame = self.next_frame();
                    *sample = self.strips[0].process(*sample, &frame);
                }
            }
            [left, right, ..] => {
                debug_assert_eq!(left.len(), right.len());
                for (l, r) in left.iter_mut().zip(right.iter_mut()) {
                    let frame = self.next_frame();
                    let [left_strip, right_strip] = &mut self.strips;
                    *l = left_strip.process(*l, &frame);
                    *r = right_strip.process(*r, &frame);
                }
            }
            [] => {}
        }
    }

    /// Process an interleaved 1- or 2-channel buffer in place.
    pub fn process_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let drive = self.params.drive.get();
        let mix = self.params.mix.get();
        self.process_interleaved_with(drive, mix, data, channels);
    }

    /// Interleaved variant of [`process_block_with`](Self::process_block_with).
    pub fn process_interleaved_with(
        &mut self,
        drive: f32,
        mix_percent: f32,
        data: &mut [f32],
        channels: usize,
    ) {
        debug_assert!((1..=MAX_CHANNELS).contains(&channels));
        debug_assert_eq!(data.len() % channels.max(1), 0);
        self.set_targets(drive, mix_percent);

        for frame_samples in data.chunks_exact_mut(channels.max(1)) {
            let frame = self.next_frame();
            for (sample, strip) in frame_samples.iter_mut().zip(self.strips.iter_mut()) {
                *sample = strip.process(*sample, &frame);
            }
        }
    }

    #[inline]
    fn set_targets(&mut self, drive: f32, mix_percent: f32) {
        self.drive.set_target(drive);
        self.mix.set_target(percent_to_mix(mix_percent));
    }

    #[inline]
    fn next_frame(&mut self) -> FrameParams {
        let drive = self.drive.next_value();
        let mix = self.mix.next_value();

        FrameParams {
            normalized_drive: drive / DRIVE.max,
            mix,
            sample_rate: self.sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Transient envelope level for a channel (0 = left), or `None` past
    /// the last channel.
    pub fn envelope(&self, channel: usize) -> Option<f32> {
        self.strips
            .get(channel)
            .map(|strip| strip.transient().envelope())
    }

    /// Gain reduction applied to the last sample on a channel, in [0, 1].
    pub fn reduction(&self, channel: usize) -> Option<f32> {
        self.strips
            .get(channel)
            .map(|strip| strip.transient().last_reduction())
    }

    /// Current smoothed drive (0 - 10).
    pub fn smoothed_drive(&self) -> f32 {
        self.drive.current()
    }

    /// Current smoothed mix (0 - 1).
    pub fn smoothed_mix(&self) -> f32 {
        self.mix.current()
    }

    /// The chain adds no latency and rings out immediately.
    pub fn tail_seconds(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;
    const SETTLE: usize = 2048;

    fn processor() -> GlueProcessor {
        let mut processor = GlueProcessor::new(Arc::new(GlueParams::new()));
        processor.prepare(SAMPLE_RATE, 512);
        processor
    }

    #[test]
    fn prepare_zeroes_envelopes() {
        let mut p = processor();
        let mut left = vec![0.9; 256];
        let mut right = vec![0.9; 256];
        p.process_block_with(10.0, 100.0, &mut [&mut left, &mut right]);
        assert!(p.envelope(0) > Some(0.0));

        p.prepare(48_000.0, 256);

        assert_eq!(p.envelope(0), Some(0.0));
        assert_eq!(p.envelope(1), Some(0.0));
        assert_eq!(p.sample_rate(), 48_000.0);
    }

    #[test]
    fn defaults_are_transparent() {
        let mut p = processor();
        let mut left: Vec<f32> = (0..512).map(|i| (i as f32 * 0.05).sin() * 0.7).collect();
        let expected = left.clone();

        p.process_block(&mut [&mut left]);

        assert_eq!(left, expected);
    }

    #[test]
    fn reads_registry_once_per_block() {
        let params = Arc::new(GlueParams::new());
        let mut p = GlueProcessor::new(Arc::clone(&params));
        p.prepare(SAMPLE_RATE, 512);

        params.set_drive(10.0);
        let mut buffer = vec![0.5; SETTLE];
        p.process_block(&mut [&mut buffer]);

        assert!((p.smoothed_drive() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn drive_ramps_instead_of_jumping() {
        let mut p = processor();
        let mut buffer = vec![0.5; 8];
        p.process_block_with(10.0, 100.0, &mut [&mut buffer]);

        let drive = p.smoothed_drive();
        assert!(drive > 0.0 && drive < 0.2, "drive after 8 samples: {drive}");
    }

    #[test]
    fn mono_leaves_right_strip_idle() {
        let mut p = processor();
        let mut buffer = vec![0.8; SETTLE];
        p.process_block_with(10.0, 100.0, &mut [&mut buffer]);

        assert!(p.envelope(0) > Some(0.0));
        assert_eq!(p.envelope(1), Some(0.0));
    }

    #[test]
    fn channels_are_independent() {
        let mut p = processor();
        let mut left = vec![0.8; SETTLE];
        let mut right = vec![0.0; SETTLE];
        p.process_block_with(10.0, 100.0, &mut [&mut left, &mut right]);

        assert!(p.envelope(0) > Some(0.5));
        assert_eq!(p.envelope(1), Some(0.0));
        assert!(right.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleaved_matches_planar() {
        let input: Vec<f32> = (0..256).map(|i| (i as f32 * 0.1).sin() * 0.6).collect();

        let mut planar = processor();
        let mut left = input.clone();
        let mut right: Vec<f32> = input.iter().map(|s| -s).collect();
        planar.process_block_with(7.0, 80.0, &mut [&mut left, &mut right]);

        let mut interleaved = processor();
        let mut data: Vec<f32> = input.iter().flat_map(|&s| [s, -s]).collect();
        interleaved.process_interleaved_with(7.0, 80.0, &mut data, 2);

        for (i, frame) in data.chunks_exact(2).enumerate() {
            assert_eq!(frame[0], left[i]);
            assert_eq!(frame[1], right[i]);
        }
    }

    #[test]
    fn empty_block_is_a_no_op() {
        let mut p = processor();
        let mut left: Vec<f32> = Vec::new();
        p.process_block_with(5.0, 50.0, &mut [&mut left]);
        assert_eq!(p.smoothed_drive(), 0.0);
    }

    #[test]
    fn meters_past_last_channel_are_none() {
        let p = processor();
        assert_eq!(p.envelope(MAX_CHANNELS), None);
        assert_eq!(p.reduction(MAX_CHANNELS), None);
        assert_eq!(p.reduction(1), Some(0.0));
    }

    #[test]
    fn reports_zero_tail() {
        assert_eq!(processor().tail_seconds(), 0.0);
    }
}
