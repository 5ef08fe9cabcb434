// Terminal front end for the render and status sinks
//
// Every call updates an in-memory screen model and redraws the whole screen, so a
// frame never depends on what was drawn before it.

use super::{RenderSink, StatusColor, StatusSink};
use crate::models::Theme;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

const BAR_GLYPH: char = '█';

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    muted: Color,
    bar: Color,
    compare: Color,
    sorted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGrey,
                bar: Color::Cyan,
                compare: Color::Red,
                sorted: Color::Green,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Grey,
                bar: Color::DarkBlue,
                compare: Color::DarkRed,
                sorted: Color::DarkGreen,
            },
        }
    }

    fn status(&self, color: StatusColor) -> Color {
        match color {
            StatusColor::Lime => self.sorted,
            StatusColor::Orange => Color::Rgb { r: 255, g: 165, b: 0 },
            StatusColor::Gray => self.muted,
            StatusColor::Gold => Color::Rgb { r: 255, g: 215, b: 0 },
            StatusColor::Red => self.compare,
        }
    }
}

#[derive(Debug, Default)]
struct Screen {
    values: Vec<f64>,
    highlight: Vec<usize>,
    sorted: Vec<usize>,
    status: String,
    status_color: StatusColor,
    explanation: String,
    alert: Option<String>,
}

struct Inner<W> {
    out: W,
    screen: Screen,
    palette: Palette,
}

/// Render and status sink drawing coloured horizontal bars with crossterm.
pub struct TerminalSink<W: Write + Send = Stdout> {
    inner: Mutex<Inner<W>>,
    bar_width: u16,
}

impl TerminalSink<Stdout> {
    /// Sink drawing to the process's stdout.
    pub fn stdout(bar_width: u16, theme: Theme) -> Self {
        Self::with_writer(io::stdout(), bar_width, theme)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn with_writer(out: W, bar_width: u16, theme: Theme) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                screen: Screen::default(),
                palette: Palette::for_theme(theme),
            }),
            bar_width: bar_width.max(1),
        }
    }

    /// Switch colour scheme and redraw.
    pub fn apply_theme(&self, theme: Theme) {
        self.update(|inner| inner.palette = Palette::for_theme(theme));
    }

    /// Hide the current alert, if any.
    pub fn dismiss_alert(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.screen.alert.take().is_some() {
            self.redraw(&mut inner);
        }
    }

    pub fn into_writer(self) -> W {
        self.inner.into_inner().unwrap().out
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Inner<W>),
    {
        let mut inner = self.inner.lock().unwrap();
        f(&mut inner);
        self.redraw(&mut inner);
    }

    fn redraw(&self, inner: &mut Inner<W>) {
        if let Err(e) = draw(inner, self.bar_width) {
            tracing::warn!("Failed to draw frame: {}", e);
        }
    }
}

fn draw<W: Write>(inner: &mut Inner<W>, bar_width: u16) -> io::Result<()> {
    let Inner {
        out,
        screen,
        palette,
    } = inner;

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    if !screen.explanation.is_empty() {
        queue!(
            out,
            SetForegroundColor(palette.muted),
            Print(&screen.explanation),
            ResetColor,
            Print("\r\n")
        )?;
    }

    queue!(
        out,
        SetForegroundColor(palette.status(screen.status_color)),
        SetAttribute(Attribute::Bold),
        Print(format!("Status: {}", screen.status)),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print("\r\n")
    )?;

    if let Some(alert) = &screen.alert {
        queue!(
            out,
            SetForegroundColor(palette.compare),
            Print(format!("! {}", alert)),
            ResetColor,
            Print("\r\n")
        )?;
    }

    queue!(out, Print("\r\n"))?;

    let peak = screen
        .values
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);

    for (index, value) in screen.values.iter().enumerate() {
        let color = if screen.highlight.contains(&index) {
            palette.compare
        } else if screen.sorted.contains(&index) {
            palette.sorted
        } else {
            palette.bar
        };

        let length = bar_length(*value, peak, bar_width);
        let bar: String = std::iter::repeat_n(BAR_GLYPH, length).collect();

        queue!(
            out,
            SetForegroundColor(palette.text),
            Print(format!("{:>8} ", value)),
            SetForegroundColor(color),
            Print(bar),
            ResetColor,
            Print("\r\n")
        )?;
    }

    out.flush()
}

/// Columns for `value` when `peak` fills the full width.
fn bar_length(value: f64, peak: f64, bar_width: u16) -> usize {
    if peak <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / peak) * f64::from(bar_width)).round() as usize
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn render(&self, values: &[f64], highlight: &[usize], sorted: &[usize]) {
        self.update(|inner| {
            inner.screen.values = values.to_vec();
            inner.screen.highlight = highlight.to_vec();
            inner.screen.sorted = sorted.to_vec();
        });
    }
}

impl<W: Write + Send> StatusSink for TerminalSink<W> {
    fn set_status(&self, message: &str, color: StatusColor) {
        self.update(|inner| {
            inner.screen.status = message.to_string();
            inner.screen.status_color = color;
        });
    }

    fn set_explanation(&self, text: &str) {
        self.update(|inner| inner.screen.explanation = text.to_string());
    }

    fn alert(&self, message: &str) {
        self.update(|inner| inner.screen.alert = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sink: TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn test_bar_length_scales_to_peak() {
        assert_eq!(bar_length(50.0, 100.0, 60), 30);
        assert_eq!(bar_length(100.0, 100.0, 60), 60);
        assert_eq!(bar_length(0.0, 100.0, 60), 0);
        assert_eq!(bar_length(-4.0, 100.0, 60), 0);
        assert_eq!(bar_length(3.0, 0.0, 60), 0);
    }

    #[test]
    fn test_render_writes_values_and_bars() {
        let sink = TerminalSink::with_writer(Vec::new(), 10, Theme::Dark);
        sink.render(&[5.0, 10.0], &[0], &[]);

        let text = output(sink);
        assert!(text.contains("       5 "));
        assert!(text.contains("      10 "));
        assert!(text.contains(&"█".repeat(10)));
    }

    #[test]
    fn test_status_and_explanation_are_drawn() {
        let sink = TerminalSink::with_writer(Vec::new(), 10, Theme::Light);
        sink.set_explanation("Merge Sort: Recursively divide, then merge sorted halves.");
        sink.set_status("Running...", StatusColor::Orange);

        let text = output(sink);
        assert!(text.contains("Merge Sort"));
        assert!(text.contains("Status: Running..."));
    }

    #[test]
    fn test_alert_until_dismissed() {
        let sink = TerminalSink::with_writer(Vec::new(), 10, Theme::Dark);
        sink.alert("Invalid input");
        sink.dismiss_alert();
        sink.set_status("Ready", StatusColor::Lime);

        let text = output(sink);
        // The final frame (after the last clear) has no alert line
        let last_frame = text.rsplit("Status:").next().unwrap();
        assert!(!last_frame.contains("Invalid input"));
        assert!(text.contains("! Invalid input"));
    }
}
