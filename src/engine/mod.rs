//! Algorithm engines and their pacing.
//!
//! An engine is an async function over the working sequence. Between visible steps it
//! awaits [`StepContext::step()`], which goes through the [`StepScheduler`] and so honours
//! the pause flag. At every step boundary it asks [`StepContext::is_stopped()`]; once that
//! returns true the engine returns [`RunOutcome::Aborted`] without rendering anything
//! further.
//!
//! # Engines
//!
//! - [`sorting`]: bubble, insertion, merge (top-down, stable) and quick (Lomuto)
//! - [`traversal`]: BFS and DFS over the fixed ten-node successor graph
//!
//! [`execute()`] dispatches one [`Algorithm`] and produces a [`RunReport`].

pub mod scheduler;
pub mod sorting;
pub mod traversal;

pub use scheduler::{DEFAULT_POLL_INTERVAL, StepScheduler};
pub use traversal::{NODE_COUNT, Traversal};

use crate::metrics::Metrics;
use crate::models::{Algorithm, RunOutcome};
use crate::render::{RenderSink, StatusColor, StatusSink};
use crate::state::StateManager;
use std::sync::Arc;
use std::time::Instant;

/// Status shown when a sorting run completes
pub const COMPLETED_STATUS: &str = "Completed";

/// Everything an engine needs during one run
///
/// Bound to a run generation: [`is_stopped()`](Self::is_stopped) turns true on a
/// reset and also as soon as a newer run is started.
pub struct StepContext {
    state: Arc<StateManager>,
    scheduler: StepScheduler,
    renderer: Arc<dyn RenderSink>,
    status: Arc<dyn StatusSink>,
    metrics: Arc<Metrics>,
    generation: u64,
}

impl StepContext {
    pub fn new(
        state: Arc<StateManager>,
        scheduler: StepScheduler,
        renderer: Arc<dyn RenderSink>,
        status: Arc<dyn StatusSink>,
        metrics: Arc<Metrics>,
        generation: u64,
    ) -> Self {
        Self {
            state,
            scheduler,
            renderer,
            status,
            metrics,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn is_stopped(&self) -> bool {
        self.state.should_stop(self.generation)
    }

    pub fn render(&self, values: &[f64], highlight: &[usize], sorted: &[usize]) {
        self.metrics.record_render();
        self.renderer.render(values, highlight, sorted);
    }

    pub fn set_status(&self, message: &str, color: StatusColor) {
        self.metrics.record_status_update();
        self.status.set_status(message, color);
    }

    pub fn set_explanation(&self, text: &str) {
        self.status.set_explanation(text);
    }

    /// Step boundary: wait out the current speed, longer while paused
    ///
    /// The speed is read fresh on every step so changes apply mid-run.
    pub async fn step(&self) {
        self.metrics.record_step();
        self.scheduler.await_step(self.state.speed()).await;
    }
}

/// Result of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub generation: u64,
    pub outcome: RunOutcome,
    /// Working sequence as the engine left it
    pub values: Vec<f64>,
    /// Visitation order for traversals, empty for sorts
    pub visit_order: Vec<usize>,
}

/// Run `algorithm` to completion or until stopped
///
/// Sorting engines own `values` for the duration of the run. Traversals ignore it
/// and hand it back unchanged.
pub async fn execute(algorithm: Algorithm, mut values: Vec<f64>, ctx: &StepContext) -> RunReport {
    let started = Instant::now();
    tracing::info!(
        "Run {} started: {} over {} values",
        ctx.generation(),
        algorithm,
        values.len()
    );

    ctx.set_explanation(algorithm.explanation());

    let mut visit_order = Vec::new();
    let outcome = if ctx.is_stopped() {
        RunOutcome::Aborted
    } else {
        match algorithm {
            Algorithm::Bubble => sorting::bubble_sort(&mut values, ctx).await,
            Algorithm::Insertion => sorting::insertion_sort(&mut values, ctx).await,
            Algorithm::Merge => sorting::merge_sort(&mut values, ctx).await,
            Algorithm::Quick => sorting::quick_sort(&mut values, ctx).await,
            Algorithm::Bfs | Algorithm::Dfs => {
                let traversal = if algorithm == Algorithm::Bfs {
                    traversal::breadth_first(ctx).await
                } else {
                    traversal::depth_first(ctx).await
                };
                visit_order = traversal.order;
                traversal.outcome
            }
        }
    };

    match outcome {
        RunOutcome::Completed => {
            if !algorithm.is_traversal() {
                let all: Vec<usize> = (0..values.len()).collect();
                ctx.render(&values, &[], &all);
                ctx.set_status(COMPLETED_STATUS, StatusColor::Lime);
            }
            ctx.metrics().record_run_completed();
            tracing::info!("Run {} completed: {}", ctx.generation(), algorithm);
        }
        RunOutcome::Aborted => {
            ctx.metrics().record_run_aborted();
            tracing::info!("Run {} aborted: {}", ctx.generation(), algorithm);
        }
    }
    ctx.metrics().record_run_time(started.elapsed());

    RunReport {
        algorithm,
        generation: ctx.generation(),
        outcome,
        values,
        visit_order,
    }
}
