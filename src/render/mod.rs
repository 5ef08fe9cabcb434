//! Output surfaces the engines and the run controller draw into.
//!
//! The core never talks to a terminal directly. It calls into two traits:
//! - [`RenderSink`]: draws one frame of bars with optional highlight/sorted index sets
//! - [`StatusSink`]: shows the status line, the per-run explanation text and alerts
//!
//! [`TerminalSink`] implements both on top of crossterm. Tests substitute recording or
//! mock sinks.

pub mod terminal;

pub use terminal::TerminalSink;

/// Colour hint attached to a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusColor {
    #[default]
    Lime,
    Orange,
    Gray,
    Gold,
    Red,
}

/// Draws the working sequence as bars.
///
/// Implementations must be idempotent: rendering the same frame twice produces the
/// same picture and has no other side effect.
pub trait RenderSink: Send + Sync {
    fn render(&self, values: &[f64], highlight: &[usize], sorted: &[usize]);
}

/// Textual feedback for the viewer.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, message: &str, color: StatusColor);

    /// Static description of the running algorithm, set once per run.
    fn set_explanation(&self, text: &str);

    /// Blocking-style popup for user errors such as malformed input.
    fn alert(&self, message: &str);
}
