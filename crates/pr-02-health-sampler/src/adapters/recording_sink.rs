//! # Recording Sink
//!
//! Keeps every observation in memory. Used by tests and by the CLI to print
//! a one-off snapshot.

use crate::domain::Observation;
use crate::ports::MetricsSink;
use parking_lot::Mutex;
use shared_types::HeightKind;
use std::time::Duration;

/// In-memory [`MetricsSink`].
#[derive(Default)]
pub struct RecordingSink {
    observations: Mutex<Vec<Observation>>,
    ticks: Mutex<Vec<Duration>>,
    suppressed: Mutex<Vec<(String, HeightKind)>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All observations recorded so far.
    pub fn observations(&self) -> Vec<Observation> {
        self.observations.lock().clone()
    }

    /// Latest value recorded under the dotted metric name `name`.
    pub fn value_of(&self, name: &str) -> Option<u64> {
        self.observations
            .lock()
            .iter()
            .rev()
            .find(|o| o.metric.to_string() == name)
            .map(|o| o.value)
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> usize {
        self.ticks.lock().len()
    }

    /// Every `(chain, kind)` lag reported as suppressed.
    pub fn suppressed_lags(&self) -> Vec<(String, HeightKind)> {
        self.suppressed.lock().clone()
    }

    /// Forget everything recorded.
    pub fn clear(&self) {
        self.observations.lock().clear();
        self.ticks.lock().clear();
        self.suppressed.lock().clear();
    }
}

impl MetricsSink for RecordingSink {
    fn record(&self, observation: &Observation) {
        self.observations.lock().push(observation.clone());
    }

    fn record_tick(&self, elapsed: Duration) {
        self.ticks.lock().push(elapsed);
    }

    fn lag_suppressed(&self, chain: &str, kind: HeightKind) {
        self.suppressed.lock().push((chain.to_string(), kind));
    }
}
