// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>> and emits change events for the front end.

use crate::models::{Algorithm, AppState, RunOutcome, Theme};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These let interested parties (the command loop, tests) follow the visualizer
/// without polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// A run was dispatched
    RunStarted { generation: u64 },

    /// The current run ended or was stopped
    RunFinished { outcome: RunOutcome },

    Paused,

    Resumed,

    SpeedChanged { speed_ms: u64 },

    /// Selection changed; `None` means an unknown name was selected
    AlgorithmSelected { algorithm: Option<Algorithm> },

    CustomInputChanged,

    /// The working sequence was replaced
    SequenceReplaced { len: usize },

    ThemeChanged { theme: Theme },

    /// Reset command processed
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// This is the owner of the process-wide execution state:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Answers the stop question for engines of a given run generation
///
/// Locks are only held for the duration of a `read()` or `update()` closure, never
/// across an await point.
pub struct StateManager {
    /// The application state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Create a StateManager around an initial state
    ///
    /// The broadcast channel buffers 100 events.
    pub fn with_state(state: AppState) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(state)),
            state_tx,
        }
    }

    /// Get a cloned snapshot of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let paused = state_manager.read(|state| state.paused);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// Captures the old state, applies the update, detects what changed and
    /// broadcasts one event per change.
    ///
    /// # Returns
    /// The StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = Self::detect_changes(&old_state, &state);
        drop(state);

        for change in &changes {
            // No subscribers is fine
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.algorithm != new.algorithm {
            changes.push(StateChange::AlgorithmSelected {
                algorithm: new.algorithm,
            });
        }

        if old.custom_input != new.custom_input {
            changes.push(StateChange::CustomInputChanged);
        }

        if old.speed != new.speed {
            changes.push(StateChange::SpeedChanged {
                speed_ms: new.speed.as_millis() as u64,
            });
        }

        if old.theme != new.theme {
            changes.push(StateChange::ThemeChanged { theme: new.theme });
        }

        if old.values != new.values {
            changes.push(StateChange::SequenceReplaced {
                len: new.values.len(),
            });
        }

        if old.paused != new.paused {
            changes.push(if new.paused {
                StateChange::Paused
            } else {
                StateChange::Resumed
            });
        }

        if old.run_generation != new.run_generation && new.is_running {
            changes.push(StateChange::RunStarted {
                generation: new.run_generation,
            });
        } else if old.is_running && !new.is_running {
            changes.push(StateChange::RunFinished {
                outcome: new.last_outcome.unwrap_or(RunOutcome::Aborted),
            });
        }

        changes
    }

    // Convenience methods for the run controller

    /// Mark a new run as started and return its generation
    ///
    /// Clears `stopped` and `paused`. Any engine still running for an older
    /// generation observes the mismatch at its next step boundary.
    pub fn begin_run(&self) -> u64 {
        let mut generation = 0;
        self.update(|state| {
            state.run_generation += 1;
            state.stopped = false;
            state.paused = false;
            state.is_running = true;
            state.last_outcome = None;
            generation = state.run_generation;
        });
        generation
    }

    /// Record the end of a run
    ///
    /// Ignored when `generation` is no longer the current run. `values` replaces the
    /// working sequence when given.
    ///
    /// # Returns
    /// Whether the result was applied
    pub fn finish_run(
        &self,
        generation: u64,
        outcome: RunOutcome,
        values: Option<Vec<f64>>,
    ) -> bool {
        let mut applied = false;
        self.update(|state| {
            if state.run_generation != generation || !state.is_running {
                return;
            }
            if let Some(values) = values {
                state.values = values;
            }
            state.is_running = false;
            state.last_outcome = Some(outcome);
            applied = true;
        });
        applied
    }

    /// Whether the engine of `generation` must halt
    pub fn should_stop(&self, generation: u64) -> bool {
        self.read(|state| state.should_stop(generation))
    }

    /// Set the pause flag
    ///
    /// # Returns
    /// Whether the flag changed
    pub fn pause(&self) -> bool {
        !self.update(|state| state.paused = true).is_empty()
    }

    /// Clear the pause flag
    ///
    /// # Returns
    /// Whether the flag changed
    pub fn resume(&self) -> bool {
        !self.update(|state| state.paused = false).is_empty()
    }

    pub fn is_paused(&self) -> bool {
        self.read(|state| state.paused)
    }

    pub fn speed(&self) -> Duration {
        self.read(|state| state.speed)
    }

    pub fn set_speed(&self, speed: Duration) -> Vec<StateChange> {
        self.update(|state| state.speed = speed)
    }

    pub fn select_algorithm(&self, algorithm: Option<Algorithm>) -> Vec<StateChange> {
        self.update(|state| state.algorithm = algorithm)
    }

    pub fn set_custom_input(&self, text: String) -> Vec<StateChange> {
        self.update(|state| state.custom_input = text)
    }

    pub fn replace_values(&self, values: Vec<f64>) -> Vec<StateChange> {
        self.update(|state| state.values = values)
    }

    /// Flip the theme and return the new one
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::Dark;
        self.update(|state| {
            state.theme = state.theme.toggled();
            theme = state.theme;
        });
        theme
    }

    /// Ask the current run to halt without touching the sequence
    ///
    /// # Returns
    /// Whether a run was in flight
    pub fn stop_run(&self) -> bool {
        let mut was_running = false;
        self.update(|state| {
            was_running = state.is_running;
            state.stopped = true;
            state.paused = false;
            if state.is_running {
                state.is_running = false;
                state.last_outcome = Some(RunOutcome::Aborted);
            }
        });
        was_running
    }

    /// Stop any in-flight run, clear pause and install a fresh sequence
    pub fn reset(&self, values: Vec<f64>) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.stopped = true;
            state.paused = false;
            if state.is_running {
                state.is_running = false;
                state.last_outcome = Some(RunOutcome::Aborted);
            }
            state.values = values;
        });

        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across tasks
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
