//! AlgoViz - step-by-step visualizer for sorting and graph traversal algorithms
//!
//! Main entry point for the terminal application.
//!
//! # Overview
//!
//! This binary wires the library together. It initializes:
//! - Configuration loading ([`ConfigManager`]) from `AlgoViz Data/algoviz.yaml`
//! - Logging infrastructure (daily rotating text or JSON file, optional console mirror)
//! - Tokio async runtime (engines run as spawned tasks)
//! - State management ([`StateManager`]) and session [`Metrics`]
//! - The terminal sink and the [`RunController`]
//!
//! Threading model:
//! - **Main thread**: reads command lines from stdin inside `block_on`
//! - **Tokio workers**: run the algorithm engines, which sleep between steps
//!
//! # Execution Flow
//!
//! 1. Load settings (defaults, then `algoviz.yaml`, then `ALGOVIZ_*` variables)
//! 2. Initialize logging into `log_dir`
//! 3. Create the tokio runtime
//! 4. Draw an initial random sequence
//! 5. Process commands until `quit` or end of input
//! 6. Stop any running engine and shut the runtime down

use anyhow::Result;
use algoviz::engine::DEFAULT_POLL_INTERVAL;
use algoviz::services::DatasetProvider;
use algoviz::{
    APP_NAME, AppState, ConfigManager, Metrics, RunController, StateManager, TerminalSink,
    VERSION,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;

const WORKER_THREADS: usize = 2;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("AlgoViz Data")?;
    let config = config_manager.load_config()?;

    // Dropping the guard flushes and stops the file writer
    let _log_guard = algoviz::logging::setup_logging(&config, "algoviz")?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(WORKER_THREADS)
        .thread_name("algoviz-worker")
        .build()?;

    tracing::info!(
        "Tokio runtime initialized with {} worker threads",
        WORKER_THREADS
    );

    let state_manager = Arc::new(StateManager::with_state(AppState::from_config(&config)));
    let metrics = Arc::new(Metrics::new());
    let sink = Arc::new(TerminalSink::stdout(config.bar_width, config.theme));

    let poll_interval = if config.poll_interval_ms == 0 {
        DEFAULT_POLL_INTERVAL
    } else {
        config.poll_interval()
    };

    let controller = RunController::new(
        Arc::clone(&state_manager),
        Arc::clone(&metrics),
        sink.clone(),
        sink.clone(),
        runtime.handle().clone(),
    )
    .with_dataset(DatasetProvider::new(config.default_size, config.max_value))
    .with_poll_interval(poll_interval);

    controller.load_initial();

    let result = runtime.block_on(algoviz::ui::run_command_loop(
        &controller,
        sink.as_ref(),
        BufReader::new(tokio::io::stdin()),
    ));

    tracing::info!("Command loop finished, shutting down");

    if controller.stop() {
        tracing::warn!("Exited during a run - engine stopped");
    }

    runtime.shutdown_timeout(Duration::from_secs(2));

    metrics.log_summary();
    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("Command loop error: {}", e);
        e
    })
}
