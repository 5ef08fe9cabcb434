//! Shared helpers for the integration tests
//!
//! [`RecordingSink`] captures everything the engines and the controller send to the
//! render and status sinks so tests can assert on the visible sequence of events.

#![allow(dead_code)]

use algoviz::engine::{DEFAULT_POLL_INTERVAL, StepContext, StepScheduler};
use algoviz::{Metrics, RenderSink, StateManager, StatusColor, StatusSink};
use std::sync::{Arc, Mutex};

/// One rendered frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub values: Vec<f64>,
    pub highlight: Vec<usize>,
    pub sorted: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<Frame>>,
    statuses: Mutex<Vec<(String, StatusColor)>>,
    explanations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn statuses(&self) -> Vec<(String, StatusColor)> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn status_messages(&self) -> Vec<String> {
        self.statuses().into_iter().map(|(message, _)| message).collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().unwrap().last().map(|(m, _)| m.clone())
    }

    pub fn explanations(&self) -> Vec<String> {
        self.explanations.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl RenderSink for RecordingSink {
    fn render(&self, values: &[f64], highlight: &[usize], sorted: &[usize]) {
        self.frames.lock().unwrap().push(Frame {
            values: values.to_vec(),
            highlight: highlight.to_vec(),
            sorted: sorted.to_vec(),
        });
    }
}

impl StatusSink for RecordingSink {
    fn set_status(&self, message: &str, color: StatusColor) {
        self.statuses
            .lock()
            .unwrap()
            .push((message.to_string(), color));
    }

    fn set_explanation(&self, text: &str) {
        self.explanations.lock().unwrap().push(text.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Start a run generation on `state` and build the engine context for it
pub fn step_context(state: &Arc<StateManager>, sink: &Arc<RecordingSink>) -> StepContext {
    let generation = state.begin_run();
    StepContext::new(
        Arc::clone(state),
        StepScheduler::new(Arc::clone(state), DEFAULT_POLL_INTERVAL),
        sink.clone(),
        sink.clone(),
        Arc::new(Metrics::new()),
        generation,
    )
}

pub fn is_sorted(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Sorted copy for multiset comparisons
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut copy = values.to_vec();
    copy.sort_by(|a, b| a.total_cmp(b));
    copy
}
