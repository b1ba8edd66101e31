//! Spectrum analyzer widget
//!
//! Log-frequency view of the processed output, with the harmonics of the test
//! tone marked so the added 3rd / 5th partials are easy to spot.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;
use vt2b_dsp::analysis;

/// Points drawn across the frequency axis.
const SPECTRUM_POINTS: usize = 64;
/// Lowest frequency shown.
const MIN_FREQ: f32 = 20.0;
/// Floor of the magnitude axis.
const FLOOR_DB: f64 = -100.0;
/// Harmonics marked when the source has a fundamental.
const MARKED_HARMONICS: usize = 5;

/// FFT front end with a fixed-size window. Allocates once.
pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin for each plotted point.
    bin_indices: Vec<usize>,
    /// (log10 Hz, dB) per plotted point.
    points: Vec<(f64, f64)>,
    sample_rate: f32,
}

impl SpectrumAnalyzer {
    /// `fft_len` should match the visualization buffer length.
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);
        let half = (fft_len / 2).max(1);

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ);
        let ratio = max_freq / MIN_FREQ;

        let mut bin_indices = Vec::with_capacity(SPECTRUM_POINTS);
        let mut points = Vec::with_capacity(SPECTRUM_POINTS);
        for i in 0..SPECTRUM_POINTS {
            let t = i as f32 / (SPECTRUM_POINTS - 1) as f32;
            let freq = MIN_FREQ * ratio.powf(t);
            let index = ((freq * fft_len as f32 / sample_rate).round() as usize).min(half - 1);
            bin_indices.push(index);
            points.push((f64::from(freq).log10(), FLOOR_DB));
        }

        Self {
            window: analysis::hann_window(fft_len),
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bin_indices,
            points,
            sample_rate,
        }
    }

    /// Recompute from the latest output. Ignores buffers of the wrong length.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Hann coherent gain 0.5, one-sided peak len / 2
        let scale = 4.0 / self.window.len() as f32;
        for (point, &index) in self.points.iter_mut().zip(&self.bin_indices) {
            let magnitude = self.scratch[index].norm() * scale;
            point.1 = f64::from(analysis::to_db(magnitude)).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Vertical marker lines at the first few harmonics of `fundamental`.
    pub fn harmonic_markers(&self, fundamental: f32) -> Vec<[(f64, f64); 2]> {
        (1..=MARKED_HARMONICS)
            .map(|n| fundamental * n as f32)
            .filter(|&f| f < self.sample_rate / 2.0)
            .map(|f| {
                let x = f64::from(f).log10();
                [(x, FLOOR_DB), (x, 0.0)]
            })
            .collect()
    }
}

/// Render the spectrum, with optional harmonic markers.
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer, fundamental: Option<f32>) {
    let markers = fundamental
        .map(|f| analyzer.harmonic_markers(f))
        .unwrap_or_default();

    let mut datasets: Vec<Dataset> = markers
        .iter()
        .map(|line| {
            Dataset::default()
                .graph_type(GraphType::Line)
                .marker(symbols::Marker::Dot)
                .style(Style::default().fg(Color::DarkGray))
                .data(line)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(analyzer.data()),
    );

    let max_x = analyzer
        .data()
        .last()
        .map(|(x, _)| *x)
        .unwrap_or(f64::from(MIN_FREQ).log10());

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([f64::from(MIN_FREQ).log10(), max_x])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 6.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn sine_peaks_near_its_frequency() {
        let sample_rate = 48_000.0;
        let len = 1_024;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);

        // Put the tone exactly on the bin read by one of the plotted points
        let bin = analyzer.bin_indices[40];
        let freq = bin as f32 * sample_rate / len as f32;
        let tone: Vec<f32> = (0..len)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect();
        analyzer.update(&tone);

        let (peak_x, peak_db) = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, FLOOR_DB), |best, p| if p.1 > best.1 { p } else { best });
        let peak_freq = 10f64.powf(peak_x);

        assert!((peak_freq - f64::from(freq)).abs() < 150.0, "peak at {peak_freq} Hz");
        assert!(peak_db > -12.0, "peak level {peak_db} dB");
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 44_100.0);
        analyzer.update(&[1.0; 100]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }

    #[test]
    fn markers_stop_at_nyquist() {
        let analyzer = SpectrumAnalyzer::new(256, 8_000.0);
        assert_eq!(analyzer.harmonic_markers(1_000.0).len(), 3);
        assert_eq!(analyzer.harmonic_markers(100.0).len(), MARKED_HARMONICS);
    }
}
