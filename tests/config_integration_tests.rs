//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Configuration loading and saving
//! - Defaults for missing or partial files
//! - Rejection of malformed files
//! - Integration with StateManager

use algoviz::{AppState, ConfigManager, StateManager, Theme, VisualizerConfig};
use camino::Utf8PathBuf;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.config_path(), config_path.join("algoviz.yaml"));
}

#[test]
fn test_config_dir_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("AlgoViz Data");

    ConfigManager::new(&nested).unwrap();

    assert!(nested.exists());
}

#[test]
fn test_save_and_reload_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let config = VisualizerConfig {
        default_size: 12,
        max_value: 50,
        speed_ms: 75,
        theme: Theme::Light,
        ..VisualizerConfig::default()
    };
    manager.save_config(&config).unwrap();
    assert!(manager.config_path().exists());

    let loaded = manager.load_config().unwrap();
    assert_eq!(loaded.default_size, 12);
    assert_eq!(loaded.max_value, 50);
    assert_eq!(loaded.speed_ms, 75);
    assert_eq!(loaded.theme, Theme::Light);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    fs::write(manager.config_path(), "bar_width: 40\n").unwrap();

    let loaded = manager.load_config().unwrap();

    assert_eq!(loaded.bar_width, 40);
    assert_eq!(loaded.poll_interval_ms, 100);
    assert_eq!(loaded.log_dir, "logs");
}

#[test]
fn test_malformed_file_is_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    fs::write(manager.config_path(), "default_size: [not, a, number\n").unwrap();

    assert!(manager.load_config().is_err());
}

#[test]
fn test_config_seeds_state_manager() {
    let config = VisualizerConfig {
        speed_ms: 40,
        theme: Theme::Light,
        ..VisualizerConfig::default()
    };

    let state = StateManager::with_state(AppState::from_config(&config));

    assert_eq!(state.speed(), Duration::from_millis(40));
    assert_eq!(state.read(|s| s.theme), Theme::Light);
}
