//! Offline measurement helpers.
//!
//! None of this runs on the audio thread. It exists so tests and the
//! terminal front end can put numbers on what the chain does to a signal:
//! level, peak, and how much energy lands on each harmonic.

use std::f32::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

/// Largest absolute sample value.
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Root-mean-square level. Zero for an empty buffer.
pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
}

/// Linear amplitude to decibels, floored at -120 dB.
pub fn to_db(amplitude: f32) -> f32 {
    20.0 * amplitude.max(1e-6).log10()
}

/// Hann window of length `len`.
pub fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            if len > 1 {
                0.5 * (1.0 - (2.0 * PI * i as f32 / (len - 1) as f32).cos())
            } else {
                1.0
            }
        })
        .collect()
}

/// Windowed magnitude spectrum (bins 0 ..= len/2), normalized so a
/// full-scale sine centred on a bin reads close to 1.0.
pub fn magnitude_spectrum(signal: &[f32]) -> Vec<f32> {
    let len = signal.len();
    if len == 0 {
        return Vec::new();
    }

    let window = hann_window(len);
    let mut bins: Vec<Complex<f32>> = signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| Complex::new(s * w, 0.0))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(len).process(&mut bins);

    // Hann coherent gain is 0.5; a one-sided sine peak is len/2
    let scale = 4.0 / len as f32;
    bins[..=len / 2].iter().map(|c| c.norm() * scale).collect()
}

/// Amplitude at each of the first `count` harmonics of `fundamental`
/// (index 0 is the fundamental itself).
///
/// Each reading is the largest bin within one bin of the expected position,
/// which absorbs the scalloping when a harmonic falls between bins.
pub fn harmonic_levels(signal: &[f32], sample_rate: f32, fundamental: f32, count: usize) -> Vec<f32> {
    let spectrum = magnitude_spectrum(signal);
    if spectrum.is_empty() {
        return vec![0.0; count];
    }

    let bin_hz = sample_rate / signal.len() as f32;
    let last = spectrum.len() - 1;

    (1..=count)
        .map(|n| {
            let centre = (fundamental * n as f32 / bin_hz).round() as usize;
            if centre > last {
                return 0.0;
            }
            let lo = centre.saturating_sub(1);
            let hi = (centre + 1).min(last);
            spectrum[lo..=hi].iter().copied().fold(0.0, f32::max)
        })
        .collect()
}

/// Total harmonic distortion: energy in harmonics 2..=count over the fundamental.
pub fn thd(signal: &[f32], sample_rate: f32, fundamental: f32, count: usize) -> f32 {
    let levels = harmonic_levels(signal, sample_rate, fundamental, count.max(2));
    let fundamental_level = levels[0];
    if fundamental_level <= 0.0 {
        return 0.0;
    }
    let harmonic_power: f32 = levels[1..].iter().map(|h| h * h).sum();
    harmonic_power.sqrt() / fundamental_level
}
