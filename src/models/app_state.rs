use super::algorithm::Algorithm;
use super::config::{Theme, VisualizerConfig};
use std::time::Duration;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The algorithm reached its termination condition
    Completed,
    /// The engine observed a stop request at a step boundary
    Aborted,
}

/// Single source of truth for the visualizer.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Engines read the execution flags through [`read()`](crate::state::StateManager::read);
/// only the run controller mutates them through
/// [`update()`](crate::state::StateManager::update).
#[derive(Clone, Debug)]
pub struct AppState {
    // Working sequence as last published by the controller or a finished run
    pub values: Vec<f64>,

    // Selection and input
    pub algorithm: Option<Algorithm>,
    pub custom_input: String,

    // Execution flags
    pub paused: bool,
    pub stopped: bool,
    pub speed: Duration,

    // Run bookkeeping
    pub run_generation: u64,
    pub is_running: bool,
    pub last_outcome: Option<RunOutcome>,

    pub theme: Theme,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            algorithm: Some(Algorithm::Bubble),
            custom_input: String::new(),
            paused: false,
            stopped: false,
            speed: Duration::from_millis(200),
            run_generation: 0,
            is_running: false,
            last_outcome: None,
            theme: Theme::Dark,
        }
    }
}

impl AppState {
    /// Initial state seeded from the loaded configuration.
    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self {
            speed: config.speed(),
            theme: config.theme,
            ..Self::default()
        }
    }

    /// True when the engine started for `generation` must halt at its next step boundary.
    ///
    /// A newer `start()` bumps the generation, which retires any older run even though
    /// it clears `stopped`.
    pub fn should_stop(&self, generation: u64) -> bool {
        self.stopped || self.run_generation != generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(!state.paused);
        assert!(!state.stopped);
        assert_eq!(state.algorithm, Some(Algorithm::Bubble));
        assert_eq!(state.speed, Duration::from_millis(200));
    }

    #[test]
    fn test_from_config() {
        let config = VisualizerConfig {
            speed_ms: 75,
            theme: Theme::Light,
            ..VisualizerConfig::default()
        };
        let state = AppState::from_config(&config);
        assert_eq!(state.speed, Duration::from_millis(75));
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_should_stop() {
        let mut state = AppState {
            run_generation: 3,
            ..AppState::default()
        };
        assert!(!state.should_stop(3));
        assert!(state.should_stop(2));

        state.stopped = true;
        assert!(state.should_stop(3));
    }
}
