//! First-order phase all-pass with a 50% dry blend.
//!
//! This stage was meant to steady low-frequency phase between channels. It is
//! NOT wired into [`GlueProcessor`](crate::processor::GlueProcessor): running
//! it shifts phase against the dry path, which changes how the Mix knob blends
//! and so changes the sound. It is kept as a standalone unit so it can be
//! measured and benchmarked on its own.
//!
//! The recursion below keeps DC at exactly unity and stays within a couple of
//! percent of unity magnitude across the audio band at the default corner, so
//! its audible effect is a small phase and level tilt rather than filtering.
//!
//! Difference equations (coefficient from the bilinear-transformed corner):
//!
//! ```text
//! c      = (1 - tan(w/2)) / (1 + tan(w/2)),   w = 2π f / fs
//! y[n]   = c · (x[n] - s) + s
//! s'     = c · (y[n] - x[n]) + x[n]
//! out[n] = 0.5 · x[n] + 0.5 · y[n]
//! ```

use std::f32::consts::PI;

/// Default corner frequency in Hz.
pub const ALLPASS_FREQUENCY: f32 = 80.0;

#[derive(Debug, Clone)]
pub struct PhaseAllpass {
    frequency: f32,
    coeff: f32,
    state: f32,
}

impl PhaseAllpass {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_frequency(sample_rate, ALLPASS_FREQUENCY)
    }

    pub fn with_frequency(sample_rate: f32, frequency: f32) -> Self {
        let mut allpass = Self {
            frequency,
            coeff: 0.0,
            state: 0.0,
        };
        allpass.set_sample_rate(sample_rate);
        allpass
    }

    /// Recompute the coefficient for a new sample rate. State is kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let omega = 2.0 * PI * self.frequency / sample_rate;
        let t = (omega / 2.0).tan();
        self.coeff = (1.0 - t) / (1.0 + t);
    }

    /// Process one sample; returns the 50/50 blend of input and all-pass output.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.coeff * (input - self.state) + self.state;
        self.state = self.coeff * (output - input) + input;

        input * 0.5 + output * 0.5
    }

    pub fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn coefficient_in_stable_range() {
        let allpass = PhaseAllpass::new(SAMPLE_RATE);
        assert!(allpass.coeff() > 0.0 && allpass.coeff() < 1.0);
    }

    #[test]
    fn dc_passes_at_unity() {
        let mut allpass = PhaseAllpass::new(SAMPLE_RATE);
        let mut out = 0.0;
        for _ in 0..48_000 {
            out = allpass.process(1.0);
        }
        assert!((out - 1.0).abs() < 1e-3, "got {out}");
    }

    #[test]
    fn magnitude_stays_flat_across_band() {
        for &freq in &[ALLPASS_FREQUENCY, 1_000.0, 5_000.0] {
            let mut allpass = PhaseAllpass::new(SAMPLE_RATE);
            let mut buffer = sine(freq, 48_000);
            let input_rms = rms(&buffer[24_000..]);

            allpass.process_buffer(&mut buffer);

            let ratio = rms(&buffer[24_000..]) / input_rms;
            assert!((ratio - 1.0).abs() < 0.02, "{freq} Hz ratio {ratio}");
        }
    }

    #[test]
    fn output_differs_from_input() {
        let mut allpass = PhaseAllpass::new(SAMPLE_RATE);
        let input = sine(1_000.0, 256);
        let mut buffer = input.clone();
        allpass.process_buffer(&mut buffer);

        assert!(buffer.iter().zip(input.iter()).any(|(a, b)| (a - b).abs() > 1e-4));
    }

    #[test]
    fn reset_clears_state() {
        let mut allpass = PhaseAllpass::new(SAMPLE_RATE);
        allpass.process(1.0);
        allpass.reset();
        let fresh = PhaseAllpass::new(SAMPLE_RATE).process(0.5);
        assert_eq!(allpass.process(0.5), fresh);
    }
}
