// Run controller - the command surface of the visualizer
//
// Owns the handles every run needs (state, sinks, metrics, dataset provider) and turns
// front-end commands into state transitions. None of its operations block: runs are
// spawned onto the tokio runtime and all waiting happens inside the engines.

use crate::engine::{self, DEFAULT_POLL_INTERVAL, RunReport, StepContext, StepScheduler};
use crate::metrics::Metrics;
use crate::models::{Algorithm, Theme, UnknownAlgorithm};
use crate::render::{RenderSink, StatusColor, StatusSink};
use crate::services::{Dataset, DatasetProvider, INVALID_INPUT_MESSAGE};
use crate::state::StateManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Slider position that maps to the shortest delay
pub const SLIDER_MAX: u32 = 1000;

/// Shortest accepted step delay
pub const MIN_SPEED: Duration = Duration::from_millis(1);

/// Coordinates runs and execution flags
///
/// # Example
/// ```ignore
/// let controller = RunController::new(state, metrics, sink.clone(), sink, Handle::current());
/// controller.set_custom_array("5,3,8,1");
/// controller.select_algorithm("bubble")?;
/// let run = controller.start();
/// ```
pub struct RunController {
    state: Arc<StateManager>,
    metrics: Arc<Metrics>,
    dataset: DatasetProvider,
    renderer: Arc<dyn RenderSink>,
    status: Arc<dyn StatusSink>,
    poll_interval: Duration,
    runtime: tokio::runtime::Handle,
}

impl RunController {
    /// Create a controller with the default dataset provider and poll interval
    ///
    /// # Arguments
    /// * `state` - Shared state manager holding the execution flags
    /// * `metrics` - Session metrics
    /// * `renderer` - Where frames are drawn
    /// * `status` - Where status, explanation and alerts go
    /// * `runtime` - Runtime the engines are spawned on
    pub fn new(
        state: Arc<StateManager>,
        metrics: Arc<Metrics>,
        renderer: Arc<dyn RenderSink>,
        status: Arc<dyn StatusSink>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            state,
            metrics,
            dataset: DatasetProvider::default(),
            renderer,
            status,
            poll_interval: DEFAULT_POLL_INTERVAL,
            runtime,
        }
    }

    pub fn with_dataset(mut self, dataset: DatasetProvider) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn state(&self) -> &Arc<StateManager> {
        &self.state
    }

    /// Install and draw a fresh random sequence, as on startup
    pub fn load_initial(&self) {
        let values = self.dataset.generate();
        self.renderer.render(&values, &[], &[]);
        self.state.replace_values(values);
        self.set_status("Ready", StatusColor::Lime);
    }

    /// Start a run of the selected algorithm
    ///
    /// Does nothing (status untouched) when no algorithm is selected. Otherwise any
    /// older run is retired, the sequence is resolved from the custom input and the
    /// engine is spawned.
    ///
    /// # Returns
    /// The join handle of the spawned run, or `None` if nothing was dispatched
    pub fn start(&self) -> Option<JoinHandle<RunReport>> {
        let Some(algorithm) = self.state.read(|s| s.algorithm) else {
            tracing::warn!("Start requested with no valid algorithm selected - ignoring");
            return None;
        };

        let generation = self.state.begin_run();
        self.metrics.record_run_started();
        self.set_status("Running...", StatusColor::Orange);

        let values = self.resolve_sequence();
        self.state.replace_values(values.clone());

        let scheduler = StepScheduler::new(Arc::clone(&self.state), self.poll_interval);
        let ctx = StepContext::new(
            Arc::clone(&self.state),
            scheduler,
            Arc::clone(&self.renderer),
            Arc::clone(&self.status),
            Arc::clone(&self.metrics),
            generation,
        );
        let state = Arc::clone(&self.state);

        tracing::info!("Dispatching {} as run {}", algorithm, generation);

        Some(self.runtime.spawn(async move {
            let report = engine::execute(algorithm, values, &ctx).await;
            let values = (!algorithm.is_traversal()).then(|| report.values.clone());
            state.finish_run(report.generation, report.outcome, values);
            report
        }))
    }

    /// Pick the working sequence for a run from the current custom input
    fn resolve_sequence(&self) -> Vec<f64> {
        let input = self.state.read(|s| s.custom_input.clone());

        let dataset = self.dataset.resolve(&input);

        let status = match &dataset {
            Dataset::Custom(_) => "Custom Array Loaded",
            Dataset::Random(_) => "Ready",
            Dataset::Fallback { error, .. } => {
                tracing::warn!("Falling back to a random sequence: {}", error);
                self.metrics.record_invalid_input();
                self.status.alert(INVALID_INPUT_MESSAGE);
                "Ready"
            }
        };

        self.renderer.render(dataset.values(), &[], &[]);
        self.set_status(status, StatusColor::Lime);
        dataset.into_values()
    }

    /// Hold the running engine at its next step; no-op if already paused
    pub fn pause(&self) {
        if self.state.pause() {
            tracing::info!("Paused");
            self.set_status("Paused", StatusColor::Gold);
        }
    }

    /// Release a paused engine; no-op unless paused
    pub fn resume(&self) {
        if self.state.resume() {
            tracing::info!("Resumed");
            self.set_status("Resumed", StatusColor::Orange);
        }
    }

    /// Stop the current run and start over with a fresh random sequence
    ///
    /// The engine notices the stop at its next step boundary.
    pub fn reset(&self) {
        let values = self.dataset.generate();
        self.state.reset(values.clone());
        tracing::info!("Reset with {} fresh values", values.len());

        self.renderer.render(&values, &[], &[]);
        self.set_status("Reset to Default", StatusColor::Lime);
    }

    /// Halt the current run, if any, leaving the sequence as the engine left it
    pub fn stop(&self) -> bool {
        let stopped = self.state.stop_run();
        if stopped {
            tracing::info!("Run stopped");
        }
        stopped
    }

    /// Set the delay per step, clamped to at least [`MIN_SPEED`]
    pub fn set_speed(&self, delay: Duration) -> Duration {
        let delay = delay.max(MIN_SPEED);
        self.state.set_speed(delay);
        tracing::debug!("Speed set to {}ms", delay.as_millis());
        delay
    }

    /// Slider semantics: higher position, shorter delay (`SLIDER_MAX - position` ms)
    pub fn set_speed_from_slider(&self, position: u32) -> Duration {
        let millis = SLIDER_MAX.saturating_sub(position);
        self.set_speed(Duration::from_millis(u64::from(millis)))
    }

    /// Store the custom input; it is parsed on the next start
    pub fn set_custom_array(&self, text: &str) {
        self.state.set_custom_input(text.trim().to_string());
    }

    /// Select an algorithm by name
    ///
    /// An unknown name clears the selection so the next start dispatches nothing.
    pub fn select_algorithm(&self, name: &str) -> Result<Algorithm, UnknownAlgorithm> {
        match name.parse::<Algorithm>() {
            Ok(algorithm) => {
                self.state.select_algorithm(Some(algorithm));
                tracing::info!("Selected {}", algorithm);
                Ok(algorithm)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.state.select_algorithm(None);
                Err(e)
            }
        }
    }

    pub fn toggle_theme(&self) -> Theme {
        let theme = self.state.toggle_theme();
        tracing::debug!("Theme switched to {:?}", theme);
        theme
    }

    /// Draw the current working sequence without highlights
    pub fn redraw(&self) {
        let values = self.state.read(|s| s.values.clone());
        self.renderer.render(&values, &[], &[]);
    }

    fn set_status(&self, message: &str, color: StatusColor) {
        self.metrics.record_status_update();
        self.status.set_status(message, color);
    }
}
