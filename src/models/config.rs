use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Colour scheme of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Encoding of the log file lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Visualizer settings from algoviz.yaml
///
/// Every field has a default so a partial file (or no file at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Number of values in a randomly generated sequence
    pub default_size: usize,

    /// Random values are drawn from `0..max_value`
    pub max_value: u32,

    /// Delay per step in milliseconds
    pub speed_ms: u64,

    /// How often a paused step re-checks the pause flag
    pub poll_interval_ms: u64,

    /// Width in columns of the longest bar
    pub bar_width: u16,

    pub theme: Theme,

    pub log_dir: String,

    pub debug_mode: bool,

    pub log_format: LogFormat,

    /// Mirror log output to the console (shares stdout with the frames)
    pub console_logging: bool,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            default_size: 30,
            max_value: 100,
            speed_ms: 200,
            poll_interval_ms: 100,
            bar_width: 60,
            theme: Theme::Dark,
            log_dir: "logs".to_string(),
            debug_mode: false,
            log_format: LogFormat::Text,
            console_logging: false,
        }
    }
}

impl VisualizerConfig {
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisualizerConfig::default();
        assert_eq!(config.default_size, 30);
        assert_eq!(config.speed(), Duration::from_millis(200));
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: VisualizerConfig = serde_yaml_ng::from_str("speed_ms: 50\ntheme: light\n").unwrap();
        assert_eq!(config.speed_ms, 50);
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.default_size, 30);
    }

    #[test]
    fn test_log_format_from_yaml() {
        let config: VisualizerConfig = serde_yaml_ng::from_str("log_format: json\n").unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(VisualizerConfig::default().log_format, LogFormat::Text);
    }

    #[test]
    fn test_zero_speed_is_clamped() {
        let config = VisualizerConfig {
            speed_ms: 0,
            ..VisualizerConfig::default()
        };
        assert_eq!(config.speed(), Duration::from_millis(1));
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
