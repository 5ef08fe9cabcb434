use crate::models::{LogFormat, VisualizerConfig};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup logging from the visualizer settings.
///
/// Log lines go to a daily rotating file in `config.log_dir`, as plain text or one
/// JSON object per event depending on `config.log_format`. With
/// `config.console_logging` they are mirrored to stderr; stdout belongs to the
/// rendered frames.
///
/// # Arguments
/// * `config` - Loaded settings (`log_dir`, `log_format`, `debug_mode`, `console_logging`)
/// * `log_prefix` - Prefix for log files (e.g., "algoviz")
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging(config: &VisualizerConfig, log_prefix: &str) -> Result<WorkerGuard> {
    ensure_log_dir(&config.log_dir)?;

    let file_appender = rolling::daily(&config.log_dir, log_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Exactly one of the two file layers is built; `None` layers are no-ops
    let (text_layer, json_layer) = match config.log_format {
        LogFormat::Text => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
        ),
    };

    let console_layer = config.console_logging.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(log_filter(config.debug_mode))
        .with(text_layer)
        .with(json_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    tracing::info!(
        "Logging initialized: dir={}, prefix={}, format={:?}, debug={}, console={}",
        config.log_dir,
        log_prefix,
        config.log_format,
        config.debug_mode,
        config.console_logging
    );

    Ok(guard)
}

/// Create the log directory if it doesn't exist
fn ensure_log_dir(log_dir: &str) -> Result<()> {
    let log_path = Utf8PathBuf::from(log_dir);
    if !log_path.exists() {
        fs::create_dir_all(&log_path)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise debug mode picks the level
fn log_filter(debug_mode: bool) -> EnvFilter {
    let default_level = if debug_mode { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_setup_logging_writes_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = VisualizerConfig {
            log_dir: temp_dir.path().to_str().unwrap().to_string(),
            log_format: LogFormat::Json,
            ..VisualizerConfig::default()
        };

        // Only one global subscriber per process; this is the only test installing one
        let guard = setup_logging(&config, "algoviz").unwrap();
        tracing::info!(marker = "json-check", "written through the file layer");
        drop(guard);

        let contents: String = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        let line = contents
            .lines()
            .find(|line| line.contains("json-check"))
            .expect("event in log file");
        assert!(line.starts_with('{'), "Expected a JSON line, got: {}", line);
        assert!(line.contains("\"marker\":\"json-check\""));
    }

    #[test]
    fn test_log_directory_created() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("nested").join("logs");

        ensure_log_dir(log_dir.to_str().unwrap()).unwrap();

        assert!(log_dir.exists());
    }
}
