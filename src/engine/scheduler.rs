use crate::state::StateManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Default interval at which a paused step re-checks the pause flag
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Cooperative pacing between engine steps
///
/// [`await_step()`](Self::await_step) sleeps for the step delay and then holds the
/// caller for as long as the pause flag is set, re-checking every `poll_interval`.
/// All waiting goes through the tokio timer; the task yields instead of spinning.
///
/// The scheduler never looks at the stop condition. Engines check it themselves at
/// the step boundary after the wait resolves.
#[derive(Clone)]
pub struct StepScheduler {
    state: Arc<StateManager>,
    poll_interval: Duration,
}

impl StepScheduler {
    pub fn new(state: Arc<StateManager>, poll_interval: Duration) -> Self {
        Self {
            state,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Suspend for `delay`, extended indefinitely while paused
    pub async fn await_step(&self, delay: Duration) {
        sleep(delay).await;

        if !self.state.is_paused() {
            return;
        }

        tracing::debug!("Step held while paused");
        while self.state.is_paused() {
            sleep(self.poll_interval).await;
        }
        tracing::debug!("Step released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    fn scheduler() -> (Arc<StateManager>, StepScheduler) {
        let state = Arc::new(StateManager::new());
        let scheduler = StepScheduler::new(Arc::clone(&state), DEFAULT_POLL_INTERVAL);
        (state, scheduler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_delay() {
        let (_state, scheduler) = scheduler();

        let started = Instant::now();
        scheduler.await_step(Duration::from_millis(250)).await;

        assert!(started.elapsed() >= Duration::from_millis(250));
        assert!(started.elapsed() < Duration::from_millis(350));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_extends_wait_until_resumed() {
        let (state, scheduler) = scheduler();
        state.pause();

        let handle = tokio::spawn(async move {
            scheduler.await_step(Duration::from_millis(10)).await;
        });

        sleep(Duration::from_secs(5)).await;
        assert!(!handle.is_finished(), "Step must not resolve while paused");

        state.resume();
        timeout(Duration::from_millis(250), handle)
            .await
            .expect("Step should resolve within one poll interval of resuming")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_during_delay_is_honoured() {
        let (state, scheduler) = scheduler();

        let handle = tokio::spawn(async move {
            scheduler.await_step(Duration::from_millis(200)).await;
        });

        sleep(Duration::from_millis(50)).await;
        state.pause();
        sleep(Duration::from_secs(2)).await;
        assert!(!handle.is_finished());

        state.resume();
        timeout(Duration::from_millis(250), handle)
            .await
            .expect("Step should resolve after resume")
            .unwrap();
    }

    #[test]
    fn test_unpaused_step_on_plain_runtime() {
        let (_state, scheduler) = scheduler();
        tokio_test::block_on(scheduler.await_step(Duration::from_millis(1)));
    }

    #[test]
    fn test_poll_interval_is_positive() {
        let state = Arc::new(StateManager::new());
        let scheduler = StepScheduler::new(state, Duration::ZERO);
        assert_eq!(scheduler.poll_interval(), Duration::from_millis(1));
    }
}
