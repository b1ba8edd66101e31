//! Rotary knob model and widget
//!
//! A knob keeps its own unquantized position in [0, 1] so that fine steps
//! smaller than the parameter's quantization still accumulate. The value it
//! publishes is always snapped through the parameter descriptor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge},
    Frame,
};
use vt2b_dsp::params::{ParamDescriptor, DRIVE, MIX};

/// Fraction of the range moved by one plain arrow press.
pub const COARSE_STEP: f32 = 0.01;
/// Fraction of the range moved with Shift held.
pub const FINE_STEP: f32 = 0.002;
/// Fraction of the range moved by one wheel notch (PageUp / PageDown).
pub const WHEEL_STEP: f32 = 0.05;
/// Pointer travel either side of twelve o'clock, in degrees.
pub const ROTATION_LIMIT: f32 = 135.0;

/// How a turn was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Coarse,
    Fine,
    Wheel,
}

impl Gesture {
    fn increment(self) -> f32 {
        match self {
            Gesture::Coarse => COARSE_STEP,
            Gesture::Fine => FINE_STEP,
            Gesture::Wheel => WHEEL_STEP,
        }
    }
}

/// Presentation for one knob: title, the range it reads in, colours.
#[derive(Debug, Clone, Copy)]
pub struct KnobStyle {
    pub title: &'static str,
    pub display_min: f32,
    pub display_max: f32,
    pub suffix: &'static str,
    pub accent: Color,
}

/// A rotary control bound to one parameter descriptor.
#[derive(Debug, Clone)]
pub struct Knob {
    descriptor: &'static ParamDescriptor,
    style: KnobStyle,
    position: f32,
}

impl Knob {
    pub fn new(descriptor: &'static ParamDescriptor, style: KnobStyle) -> Self {
        Self {
            descriptor,
            style,
            position: descriptor.normalize(descriptor.default),
        }
    }

    /// Drive reads 0 - 100 on the face while the parameter runs 0 - 10.
    pub fn drive() -> Self {
        Self::new(
            &DRIVE,
            KnobStyle {
                title: "DRIVE",
                display_min: 0.0,
                display_max: 100.0,
                suffix: "",
                accent: Color::Rgb(0xe0, 0x6c, 0x2f),
            },
        )
    }

    pub fn mix() -> Self {
        Self::new(
            &MIX,
            KnobStyle {
                title: "MIX",
                display_min: 0.0,
                display_max: 100.0,
                suffix: "%",
                accent: Color::Rgb(0xc8, 0xc8, 0xc8),
            },
        )
    }

    /// Move by one gesture unit in `direction` (+1 clockwise, -1 counter).
    /// Returns the quantized parameter value to publish.
    pub fn turn(&mut self, direction: f32, gesture: Gesture) -> f32 {
        self.position = (self.position + direction * gesture.increment()).clamp(0.0, 1.0);
        self.value()
    }

    /// Back to the parameter default (the double-click action).
    pub fn reset(&mut self) -> f32 {
        self.position = self.descriptor.normalize(self.descriptor.default);
        self.value()
    }

    /// Follow a value written by someone else. Keeps the sub-step position
    /// when it still rounds to `value`.
    pub fn sync(&mut self, value: f32) {
        if self.value() != self.descriptor.quantize(value) {
            self.position = self.descriptor.normalize(value);
        }
    }

    /// Quantized parameter value.
    pub fn value(&self) -> f32 {
        self.descriptor
            .quantize(self.descriptor.denormalize(self.position))
    }

    /// Value in the knob's display range.
    pub fn display_value(&self) -> f32 {
        let fraction = self.descriptor.normalize(self.value());
        self.style.display_min + fraction * (self.style.display_max - self.style.display_min)
    }

    pub fn display_text(&self) -> String {
        format!("{:.0}{}", self.display_value(), self.style.suffix)
    }

    /// Pointer angle in degrees, 0 at twelve o'clock, clockwise positive.
    pub fn angle(&self) -> f32 {
        let fraction = self.descriptor.normalize(self.value());
        -ROTATION_LIMIT + fraction * 2.0 * ROTATION_LIMIT
    }

    pub fn descriptor(&self) -> &'static ParamDescriptor {
        self.descriptor
    }

    pub fn style(&self) -> &KnobStyle {
        &self.style
    }
}

/// Arrow glyph closest to a pointer angle.
fn pointer_glyph(angle: f32) -> &'static str {
    const GLYPHS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
    let octant = ((angle.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    GLYPHS[octant]
}

/// Render a knob as a titled gauge with a pointer glyph.
pub fn render_knob(frame: &mut Frame, area: Rect, knob: &Knob, focused: bool) {
    let style = knob.style();
    let border = if focused {
        Style::default().fg(style.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(style.title, Style::default().fg(style.accent)),
        Span::raw(" "),
        Span::raw(pointer_glyph(knob.angle())),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(style.accent).bg(Color::Black))
        .ratio(f64::from(knob.descriptor().normalize(knob.value())))
        .label(knob.display_text());

    frame.render_widget(gauge, area);
}
