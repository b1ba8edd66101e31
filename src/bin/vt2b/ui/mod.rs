//! Terminal control surface for vt2b
//!
//! Two knobs, an oscilloscope and a spectrum of the processed output, and a
//! gain-reduction meter. Knob changes go straight into the shared parameter
//! registry; the audio thread picks them up on its next block.

mod knob;
mod meters;
mod spectrum;
pub mod state;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::{sync::Arc, time::Duration};
use vt2b_dsp::params::{AtomicParam, GlueParams};

use knob::{render_knob, Gesture, Knob};
use meters::{render_reduction, render_status, AudioStats};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use state::{MeterFrame, StreamInfo};
use waveform::render_waveform;

/// Samples kept for the scope and the FFT.
pub const VIS_BUFFER_SIZE: usize = 2048;

const DRIVE_KNOB: usize = 0;
const MIX_KNOB: usize = 1;

/// UI application state
pub struct UiApp {
    params: Arc<GlueParams>,
    audio_rx: Consumer<f32>,
    meter_rx: Consumer<MeterFrame>,
    info: StreamInfo,
    /// Fundamental of the test source, if it has one.
    fundamental: Option<f32>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    meter: MeterFrame,
    knobs: [Knob; 2],
    focused: usize,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        params: Arc<GlueParams>,
        audio_rx: Consumer<f32>,
        meter_rx: Consumer<MeterFrame>,
        info: StreamInfo,
        fundamental: Option<f32>,
    ) -> Self {
        let mut knobs = [Knob::drive(), Knob::mix()];
        knobs[DRIVE_KNOB].sync(params.drive.get());
        knobs[MIX_KNOB].sync(params.mix.get());

        Self {
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, info.sample_rate),
            params,
            audio_rx,
            meter_rx,
            info,
            fundamental,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            meter: MeterFrame::default(),
            knobs,
            focused: DRIVE_KNOB,
            should_quit: false,
        }
    }

    /// Run the UI event loop until the user quits.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_meters();

            terminal.draw(|frame| self.render(frame))?;

            // ~60 fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Drain the sample ring, keeping the newest VIS_BUFFER_SIZE samples.
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        self.audio_buffer.reserve(available);
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(..excess);
        }

        self.spectrum.update(&self.audio_buffer);
    }

    /// Keep only the latest meter frame.
    fn poll_meters(&mut self) {
        while let Ok(meter) = self.meter_rx.pop() {
            self.meter = meter;
        }
    }

    fn param(&self, knob: usize) -> &AtomicParam {
        match knob {
            DRIVE_KNOB => &self.params.drive,
            _ => &self.params.mix,
        }
    }

    fn turn_focused(&mut self, direction: f32, gesture: Gesture) {
        let value = self.knobs[self.focused].turn(direction, gesture);
        self.param(self.focused).set(value);
    }

    fn reset_focused(&mut self) {
        let value = self.knobs[self.focused].reset();
        self.param(self.focused).set(value);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let fine = key.modifiers.contains(KeyModifiers::SHIFT);
        let step = if fine { Gesture::Fine } else { Gesture::Coarse };

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focused = (self.focused + 1) % self.knobs.len();
            }
            KeyCode::Char('d') => self.focused = DRIVE_KNOB,
            KeyCode::Char('m') => self.focused = MIX_KNOB,
            KeyCode::Up | KeyCode::Char('k') => self.turn_focused(1.0, step),
            KeyCode::Down | KeyCode::Char('j') => self.turn_focused(-1.0, step),
            KeyCode::PageUp => self.turn_focused(1.0, Gesture::Wheel),
            KeyCode::PageDown => self.turn_focused(-1.0, Gesture::Wheel),
            KeyCode::Char('r') | KeyCode::Backspace => self.reset_focused(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status
                Constraint::Length(3), // Knobs
                Constraint::Length(3), // Gain reduction
                Constraint::Min(8),    // Scope + spectrum
                Constraint::Length(1), // Help
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, rows[0], &self.info, &stats);

        let knob_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        for (i, knob) in self.knobs.iter().enumerate() {
            render_knob(frame, knob_cols[i], knob, i == self.focused);
        }

        render_reduction(frame, rows[2], &self.meter);

        let views = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        render_waveform(frame, views[0], &self.audio_buffer);
        render_spectrum(frame, views[1], &self.spectrum, self.fundamental);

        let help = Paragraph::new(
            " [Q] Quit  [Tab] Knob  [↑/↓] Turn  [Shift] Fine  [PgUp/PgDn] Jump  [R] Default",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[4]);
    }
}
