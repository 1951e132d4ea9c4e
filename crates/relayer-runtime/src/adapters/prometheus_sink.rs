//! # Prometheus Sink
//!
//! Implements the sampler's `MetricsSink` over the telemetry registry.

use pr_02_health_sampler::{MetricName, MetricsSink, Observation};
use shared_types::HeightKind;
use relayer_telemetry::{
    set_gauge, CHAIN_HEIGHT, DELAYED_QUEUE_SIZE, HEIGHT_LAG, QUEUE_SIZE, SAMPLER_TICK_DURATION,
};
use std::time::Duration;

/// Writes sampler observations into Prometheus gauges.
///
/// A lag that cannot be derived for a tick is removed from the exposition
/// rather than left at its last value.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusSink;

impl PrometheusSink {
    /// Create a sink.
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for PrometheusSink {
    fn record(&self, observation: &Observation) {
        let value = observation.value;
        match &observation.metric {
            MetricName::Height { chain, kind } => {
                set_gauge(&CHAIN_HEIGHT.with_label_values(&[chain.as_str(), kind.as_str()]), value)
            }
            MetricName::Lag { chain, kind } => {
                set_gauge(&HEIGHT_LAG.with_label_values(&[chain.as_str(), kind.as_str()]), value)
            }
            MetricName::QueueSize { chain, direction } => set_gauge(
                &QUEUE_SIZE.with_label_values(&[chain.as_str(), direction.as_str()]),
                value,
            ),
            MetricName::DelayedQueueSize => set_gauge(&DELAYED_QUEUE_SIZE, value),
        }
    }

    fn record_tick(&self, elapsed: Duration) {
        SAMPLER_TICK_DURATION.observe(elapsed.as_secs_f64());
    }

    fn lag_suppressed(&self, chain: &str, kind: HeightKind) {
        // Absent label sets are not an error here.
        let _ = HEIGHT_LAG.remove_label_values(&[chain, kind.as_str()]);
    }
}
