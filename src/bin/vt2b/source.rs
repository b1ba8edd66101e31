//! Test signals generated on the audio thread
//!
//! Both sources are plain state machines: no allocation after construction,
//! one call per block.

use std::f32::consts::TAU;

/// Pitch of the drum body.
const DRUM_BODY_HZ: f32 = 55.0;
/// Decay time constant of the drum body, in seconds.
const DRUM_DECAY: f32 = 0.12;
/// Length of the click at the head of each hit, in seconds.
const DRUM_CLICK: f32 = 0.002;

/// What the front end plays into the processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// Steady tone, useful for watching harmonics appear.
    Sine { freq: f32, amplitude: f32 },
    /// A kick-like hit on every beat, useful for watching the transient shaper.
    Drums { bpm: f32, amplitude: f32 },
}

impl Source {
    /// Fundamental worth marking on the spectrum.
    pub fn fundamental(&self) -> Option<f32> {
        match *self {
            Source::Sine { freq, .. } => Some(freq),
            Source::Drums { .. } => Some(DRUM_BODY_HZ),
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            Source::Sine { freq, amplitude } => format!("Sine {freq:.0} Hz @ {amplitude:.2}"),
            Source::Drums { bpm, amplitude } => format!("Drums {bpm:.0} BPM @ {amplitude:.2}"),
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Drums {
            bpm: 120.0,
            amplitude: 0.9,
        }
    }
}

/// Running generator for a [`Source`].
pub struct SourceGenerator {
    source: Source,
    sample_rate: f32,
    phase: f32,
    /// Samples since the last drum hit.
    position: usize,
}

impl SourceGenerator {
    pub fn new(source: Source, sample_rate: f32) -> Self {
        Self {
            source,
            sample_rate,
            phase: 0.0,
            position: 0,
        }
    }

    /// Write the next `left.len()` samples to both channels.
    pub fn fill(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let sample = self.next_sample();
            *l = sample;
            *r = sample;
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        match self.source {
            Source::Sine { freq, amplitude } => {
                let sample = amplitude * (TAU * self.phase).sin();
                self.advance_phase(freq);
                sample
            }
            Source::Drums { bpm, amplitude } => {
                let beat = ((60.0 / bpm.max(1.0)) * self.sample_rate) as usize;
                if self.position >= beat.max(1) {
                    self.position = 0;
                    self.phase = 0.0;
                }

                let t = self.position as f32 / self.sample_rate;
                let body = (-t / DRUM_DECAY).exp() * (TAU * self.phase).sin();
                let click = if t < DRUM_CLICK { 1.0 - t / DRUM_CLICK } else { 0.0 };

                // pitch drops from ~3x to the body frequency over the first hit
                let sweep = 1.0 + 2.0 * (-t / 0.02).exp();
                self.advance_phase(DRUM_BODY_HZ * sweep);
                self.position += 1;

                amplitude * (0.8 * body + 0.2 * click)
            }
        }
    }

    #[inline]
    fn advance_phase(&mut self, freq: f32) {
        self.phase += freq / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }
}
