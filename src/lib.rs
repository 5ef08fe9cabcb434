// AlgoViz - step-by-step visualizer for sorting and graph traversal algorithms
//
// This is the library crate containing the engines, run control and state.
// The binary crate (main.rs) provides the terminal entry point.

pub mod config;
pub mod controller;
pub mod engine;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod render;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use controller::RunController;
pub use engine::RunReport;
pub use metrics::Metrics;
pub use models::{Algorithm, AppState, RunOutcome, Theme, VisualizerConfig};
pub use render::{RenderSink, StatusColor, StatusSink, TerminalSink};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
