use crate::dsp::{
    gain::{makeup_gain, pre_drive_gain},
    harmonics::harmonics,
    mix::blend_dry_wet,
    saturation::saturate,
    transient::TransientShaper,
};

/// Smoothed control values for one sample frame, shared by every channel.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    /// Drive / DRIVE_MAX, in [0, 1].
    pub normalized_drive: f32,
    /// Dry/wet amount in [0, 1].
    pub mix: f32,
    pub sample_rate: f32,
}

/// One channel of the chain. Owns that channel's transient envelope.
#[derive(Debug, Clone, Default)]
pub struct ChannelStrip {
    transient: TransientShaper,
}

impl ChannelStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the wet path for one dry sample.
    #[inline]
    pub fn wet(&mut self, dry: f32, frame: &FrameParams) -> f32 {
        let drive = frame.normalized_drive;
        let boosted = dry * pre_drive_gain(drive);

        // Harmonics come from the boosted dry sample, not the saturated one
        let mut wet = saturate(boosted, drive);
        wet += harmonics(boosted, drive);
        wet = self.transient.shape(wet, drive, frame.sample_rate);

        wet * makeup_gain(drive)
    }

    /// Full chain for one sample: wet path, then dry/wet blend.
    #[inline]
    pub fn process(&mut self, dry: f32, frame: &FrameParams) -> f32 {
        let wet = self.wet(dry, frame);
        blend_dry_wet(dry, wet, frame.mix)
    }

    pub fn reset(&mut self) {
        self.transient.reset();
    }

    pub fn transient(&self) -> &TransientShaper {
        &self.transient
    }
}
