//! Data models for the visualizer.
//!
//! - [`AppState`]: execution flags, selection and the working sequence
//! - [`Algorithm`]: the selectable sorting and traversal algorithms
//! - [`VisualizerConfig`]: settings loaded from `algoviz.yaml`
//!
//! `AppState` is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager);
//! all mutations go through its `update()` method so change events are emitted.

pub mod algorithm;
pub mod app_state;
pub mod config;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use app_state::{AppState, RunOutcome};
pub use config::{LogFormat, Theme, VisualizerConfig};
