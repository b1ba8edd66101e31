//! Output oscilloscope

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Vertical headroom above full scale, so overs stay visible.
const Y_LIMIT: f64 = 1.5;

/// Render the processed output, with the full-scale lines marked.
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let len = audio_buffer.len().max(1) as f64;
    let clipping = audio_buffer.iter().any(|s| s.abs() > 1.0);

    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len, f64::from(sample).clamp(-Y_LIMIT, Y_LIMIT)))
        .collect();
    let ceiling = [(0.0, 1.0), (1.0, 1.0)];
    let floor = [(0.0, -1.0), (1.0, -1.0)];

    let trace = if clipping { Color::Red } else { Color::Cyan };
    let datasets = vec![
        Dataset::default()
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::DarkGray))
            .data(&ceiling),
        Dataset::default()
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::DarkGray))
            .data(&floor),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(trace))
            .data(&data),
    ];

    let title = if clipping { " Output  OVER " } else { " Output " };
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-Y_LIMIT, Y_LIMIT])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
