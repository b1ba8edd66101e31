//! Status bar and gain-reduction meter

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use vt2b_dsp::{analysis, GlueProcessor};

use super::state::{MeterFrame, StreamInfo};

/// Level readings over the visualization buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        Self {
            peak: analysis::peak(buffer),
            rms: analysis::rms(buffer),
        }
    }
}

/// Render the top status line: name, stream, source, levels.
pub fn render_status(frame: &mut Frame, area: Rect, info: &StreamInfo, stats: &AudioStats) {
    let block = Block::default()
        .title(format!(" {} ", GlueProcessor::NAME))
        .borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", info.source),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:.1}kHz {}ch  ", info.sample_rate / 1000.0, info.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{}  ", info.device), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(
                "Peak: {:.1} dB  RMS: {:.1} dB",
                analysis::to_db(stats.peak),
                analysis::to_db(stats.rms)
            ),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the transient shaper's gain reduction as a bar.
pub fn render_reduction(frame: &mut Frame, area: Rect, meter: &MeterFrame) {
    let reduction = meter.max_reduction().clamp(0.0, 1.0);
    let db = analysis::to_db(1.0 - reduction);

    let gauge = Gauge::default()
        .block(Block::default().title(" Transient GR ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
        .ratio(f64::from(reduction))
        .label(format!(
            "{db:.1} dB  env {:.2}  drive {:.1}  mix {:.0}%",
            meter.envelope[0],
            meter.drive,
            meter.mix * 100.0
        ));

    frame.render_widget(gauge, area);
}
