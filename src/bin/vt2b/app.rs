//! Vt2b - application builder and runner

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
use rtrb::RingBuffer;
use std::sync::Arc;
use tracing::{error, info, warn};

use vt2b_dsp::{
    processor::MAX_CHANNELS, ChannelLayout, GlueParams, GlueProcessor, ParamSnapshot, MAX_BLOCK_SIZE,
};

use super::source::{Source, SourceGenerator};
use super::ui::{
    state::{MeterFrame, StreamInfo},
    UiApp, VIS_BUFFER_SIZE,
};

/// Meter frames buffered between the audio and UI threads.
const METER_RING_SIZE: usize = 64;

/// Main application builder
pub struct Vt2b {
    source: Source,
    initial: ParamSnapshot,
}

impl Vt2b {
    pub fn new() -> Self {
        Self {
            source: Source::default(),
            initial: ParamSnapshot::default(),
        }
    }

    /// Signal fed into the processor
    pub fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Starting drive, 0 - 10
    pub fn drive(mut self, drive: f32) -> Self {
        self.initial.drive = drive;
        self
    }

    /// Starting mix, 0 - 100 %
    pub fn mix(mut self, mix_percent: f32) -> Self {
        self.initial.mix = mix_percent;
        self
    }

    /// Open the default output device, start processing and hand the
    /// terminal to the UI. Returns when the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown device".into());
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        if config.sample_format() != SampleFormat::F32 {
            bail!(
                "output device '{device_name}' wants {:?} samples, only f32 is supported",
                config.sample_format()
            );
        }

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(device = %device_name, sample_rate, channels, "opened output device");
        let layout = ChannelLayout::from_channels(channels.min(MAX_CHANNELS))
            .ok_or_else(|| eyre!("output device '{device_name}' reports no channels"))?;
        if channels > MAX_CHANNELS {
            warn!(channels, "device has more than two channels, extras get the left channel");
        }

        let params = Arc::new(GlueParams::new());
        params.apply(self.initial);

        let mut processor = GlueProcessor::new(Arc::clone(&params));
        processor.prepare(sample_rate, MAX_BLOCK_SIZE);
        let block_size = processor.max_block_size();

        let mut generator = SourceGenerator::new(self.source, sample_rate);

        // Audio -> UI: processed left channel for the scope, and per-block meters
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * 4);
        let (mut meter_tx, meter_rx) = RingBuffer::<MeterFrame>::new(METER_RING_SIZE);

        let mut left = vec![0.0f32; block_size];
        let mut right = vec![0.0f32; block_size];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(block_size);
                        let l = &mut left[..frames];
                        let r = &mut right[..frames];

                        generator.fill(l, r);
                        match layout {
                            ChannelLayout::Mono => processor.process_block(&mut [&mut *l]),
                            ChannelLayout::Stereo => processor.process_block(&mut [&mut *l, &mut *r]),
                        }

                        let out = &mut data[frames_written * channels..(frames_written + frames) * channels];
                        for (i, frame) in out.chunks_exact_mut(channels).enumerate() {
                            for (ch, sample) in frame.iter_mut().enumerate() {
                                *sample = if ch == 1 { r[i] } else { l[i] };
                            }
                            // Scope drops samples when the UI falls behind
                            let _ = audio_tx.push(l[i]);
                        }

                        frames_written += frames;
                    }

                    let _ = meter_tx.push(MeterFrame {
                        envelope: std::array::from_fn(|ch| processor.envelope(ch).unwrap_or_default()),
                        reduction: std::array::from_fn(|ch| processor.reduction(ch).unwrap_or_default()),
                        drive: processor.smoothed_drive(),
                        mix: processor.smoothed_mix(),
                    });
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        info!(source = %self.source.describe(), "stream running");

        let info = StreamInfo {
            device: device_name,
            sample_rate,
            channels,
            source: self.source.describe(),
        };
        let mut ui = UiApp::new(
            Arc::clone(&params),
            audio_rx,
            meter_rx,
            info,
            self.source.fundamental(),
        );

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        info!(final_params = ?params.snapshot(), "stream stopped");
        result
    }
}

impl Default for Vt2b {
    fn default() -> Self {
        Self::new()
    }
}
