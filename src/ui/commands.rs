// Command loop - bridges line-oriented text input to the run controller
//
// Each input line is one command. Runs are spawned by the controller and keep going
// while the loop waits for the next line, so pause/resume/reset take effect on the
// running engine at its next step boundary.

use crate::controller::RunController;
use crate::render::{StatusColor, StatusSink, TerminalSink};
use anyhow::{Context, Result};
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP_TEXT: &str = "Commands: start | pause | resume | reset | speed <ms> | slider <0-1000> | \
custom <n,n,...> | algo <bubble|insertion|merge|quick|bfs|dfs> | theme | quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    /// Delay per step in milliseconds
    Speed(u64),
    /// Slider position; the delay becomes `1000 - position` ms
    Slider(u32),
    /// Custom array text; empty clears it
    Custom(String),
    SelectAlgorithm(String),
    Theme,
    Help,
    Quit,
}

/// Errors from parsing an input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "reset" => Ok(Command::Reset),
            "speed" => parse_number(rest, "speed").map(Command::Speed),
            "slider" => parse_number(rest, "slider").map(Command::Slider),
            "custom" => Ok(Command::Custom(rest.to_string())),
            "algo" | "algorithm" => {
                if rest.is_empty() {
                    Err(CommandError::MissingArgument("algo"))
                } else {
                    Ok(Command::SelectAlgorithm(rest.to_string()))
                }
            }
            "theme" => Ok(Command::Theme),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_number<T: FromStr>(text: &str, command: &'static str) -> Result<T, CommandError> {
    if text.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_string()))
}

/// Apply one command
///
/// # Returns
/// `false` when the loop should exit
pub fn dispatch<W: Write + Send>(
    command: Command,
    controller: &RunController,
    sink: &TerminalSink<W>,
) -> bool {
    tracing::debug!("Command: {:?}", command);

    match command {
        Command::Start => {
            // The run is detached; the engine reports through the sinks
            let _ = controller.start();
        }
        Command::Pause => controller.pause(),
        Command::Resume => controller.resume(),
        Command::Reset => controller.reset(),
        Command::Speed(millis) => {
            controller.set_speed(Duration::from_millis(millis));
        }
        Command::Slider(position) => {
            controller.set_speed_from_slider(position);
        }
        Command::Custom(text) => controller.set_custom_array(&text),
        Command::SelectAlgorithm(name) => {
            // Unknown names leave nothing selected; start then does nothing
            let _ = controller.select_algorithm(&name);
        }
        Command::Theme => {
            let theme = controller.toggle_theme();
            sink.apply_theme(theme);
        }
        Command::Help => sink.set_status(HELP_TEXT, StatusColor::Gray),
        Command::Quit => return false,
    }

    true
}

/// Read commands until `quit` or end of input
pub async fn run_command_loop<R, W>(
    controller: &RunController,
    sink: &TerminalSink<W>,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command input")?
    {
        sink.dismiss_alert();

        match line.parse::<Command>() {
            Ok(command) => {
                if !dispatch(command, controller, sink) {
                    tracing::info!("Quit requested");
                    break;
                }
            }
            Err(CommandError::Empty) => {}
            Err(e) => {
                tracing::warn!("Rejected command {:?}: {}", line, e);
                sink.alert(&format!("{}. Type 'help' for commands.", e));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!("  PAUSE ".parse::<Command>(), Ok(Command::Pause));
        assert_eq!("resume".parse::<Command>(), Ok(Command::Resume));
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("theme".parse::<Command>(), Ok(Command::Theme));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!("speed 50".parse::<Command>(), Ok(Command::Speed(50)));
        assert_eq!("slider 900".parse::<Command>(), Ok(Command::Slider(900)));
        assert_eq!(
            "custom 5, 3, 8, 1".parse::<Command>(),
            Ok(Command::Custom("5, 3, 8, 1".to_string()))
        );
        assert_eq!("custom".parse::<Command>(), Ok(Command::Custom(String::new())));
        assert_eq!(
            "algo quick".parse::<Command>(),
            Ok(Command::SelectAlgorithm("quick".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "jump".parse::<Command>(),
            Err(CommandError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "speed".parse::<Command>(),
            Err(CommandError::MissingArgument("speed"))
        );
        assert_eq!(
            "speed fast".parse::<Command>(),
            Err(CommandError::InvalidNumber("fast".to_string()))
        );
        assert_eq!(
            "algo".parse::<Command>(),
            Err(CommandError::MissingArgument("algo"))
        );
    }
}
