use crate::models::VisualizerConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Name of the settings file inside the config directory
pub const CONFIG_FILE_NAME: &str = "algoviz.yaml";

/// Prefix of environment variables overriding file settings (e.g. `ALGOVIZ_SPEED_MS`)
pub const ENV_PREFIX: &str = "ALGOVIZ";

/// Configuration manager for loading and saving the visualizer settings.
///
/// Settings are layered, later sources winning:
/// 1. Built-in defaults ([`VisualizerConfig::default`])
/// 2. `algoviz.yaml` in the config directory (optional)
/// 3. `ALGOVIZ_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the settings from defaults, file and process environment.
    pub fn load_config(&self) -> Result<VisualizerConfig> {
        self.load_with_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load the settings with an explicit environment source.
    fn load_with_environment(&self, environment: Environment) -> Result<VisualizerConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
        }

        let defaults = Config::try_from(&VisualizerConfig::default())
            .context("Failed to build default settings")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(
                File::new(self.config_path.as_str(), FileFormat::Yaml).required(false),
            )
            .add_source(environment.try_parsing(true))
            .build()
            .with_context(|| format!("Failed to load settings from {}", self.config_path))?;

        let config: VisualizerConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings from {}", self.config_path))?;

        tracing::info!(
            "Loaded config: size={}, speed={}ms, theme={:?}",
            config.default_size,
            config.speed_ms,
            config.theme
        );
        Ok(config)
    }

    /// Save the settings file.
    pub fn save_config(&self, config: &VisualizerConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
