// Performance metrics module
//
// Lightweight counters describing what the engines did during a session

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations so engines and the controller can record without locks.
/// The summary is logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Runs dispatched to an engine
    pub runs_started: AtomicUsize,

    /// Runs that reached their termination condition
    pub runs_completed: AtomicUsize,

    /// Runs that observed a stop request
    pub runs_aborted: AtomicUsize,

    /// Step boundaries passed (one per scheduler wait)
    pub steps: AtomicU64,

    /// Element swaps performed by the sorting engines
    pub swaps: AtomicU64,

    /// Single-element writes (insertion shifts, merge writes)
    pub writes: AtomicU64,

    /// Frames sent to the render sink
    pub renders: AtomicU64,

    /// Status messages sent to the status sink
    pub status_updates: AtomicU64,

    /// Custom inputs rejected by the dataset provider
    pub invalid_inputs: AtomicUsize,

    /// Wall time spent inside finished runs in milliseconds
    pub total_run_time_ms: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            runs_started: AtomicUsize::new(0),
            runs_completed: AtomicUsize::new(0),
            runs_aborted: AtomicUsize::new(0),
            steps: AtomicU64::new(0),
            swaps: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            renders: AtomicU64::new(0),
            status_updates: AtomicU64::new(0),
            invalid_inputs: AtomicUsize::new(0),
            total_run_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_run_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_completed(&self) {
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_aborted(&self) {
        self.runs_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_step(&self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swap(&self) {
        self.swaps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_status_update(&self) {
        self.status_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_input(&self) {
        self.invalid_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_run_time(&self, duration: Duration) {
        self.total_run_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average steps per finished run
    pub fn avg_steps_per_run(&self) -> f64 {
        let finished = self.runs_completed.load(Ordering::Relaxed)
            + self.runs_aborted.load(Ordering::Relaxed);
        if finished > 0 {
            self.steps.load(Ordering::Relaxed) as f64 / finished as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Runs: {} started, {} completed, {} aborted",
            self.runs_started.load(Ordering::Relaxed),
            self.runs_completed.load(Ordering::Relaxed),
            self.runs_aborted.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Steps: {} (avg {:.1} per run), swaps: {}, writes: {}",
            self.steps.load(Ordering::Relaxed),
            self.avg_steps_per_run(),
            self.swaps.load(Ordering::Relaxed),
            self.writes.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Renders: {}, status updates: {}, rejected inputs: {}",
            self.renders.load(Ordering::Relaxed),
            self.status_updates.load(Ordering::Relaxed),
            self.invalid_inputs.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Total run time: {:.2}s",
            self.total_run_time_ms.load(Ordering::Relaxed) as f64 / 1000.0
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
