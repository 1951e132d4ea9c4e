//! Prometheus metrics for the relayer control plane.
//!
//! All metrics follow the naming convention: `relayer_<metric>_<unit>`
//!
//! Sampler observations land in gauges labelled by chain, so the dotted
//! observation name `height_diff.tx_sync.Ethereum` becomes
//! `relayer_height_lag{chain="Ethereum",kind="tx"}`.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // HEALTH SAMPLER METRICS (Subsystem 2)
    // =========================================================================

    /// Latest height per chain and counter
    pub static ref CHAIN_HEIGHT: IntGaugeVec = IntGaugeVec::new(
        Opts::new("relayer_chain_height", "Latest height per chain"),
        &["chain", "kind"]  // kind: node/header/tx
    ).expect("metric creation failed");

    /// Lag between node height and a sync cursor
    pub static ref HEIGHT_LAG: IntGaugeVec = IntGaugeVec::new(
        Opts::new("relayer_height_lag", "Node height minus synced height, clamped at 0"),
        &["chain", "kind"]  // kind: header/tx
    ).expect("metric creation failed");

    /// Per-chain relay queue depth
    pub static ref QUEUE_SIZE: IntGaugeVec = IntGaugeVec::new(
        Opts::new("relayer_queue_size", "Pending entries in a per-chain relay queue"),
        &["chain", "direction"]  // direction: src/poly
    ).expect("metric creation failed");

    /// Global delayed queue depth
    pub static ref DELAYED_QUEUE_SIZE: IntGauge = IntGauge::new(
        "relayer_delayed_queue_size",
        "Pending entries in the global delayed queue"
    ).expect("metric creation failed");

    /// Wall-clock duration of a sampler tick
    pub static ref SAMPLER_TICK_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "relayer_sampler_tick_duration_seconds",
            "Time spent on one health sampler tick"
        ).buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0])
    ).expect("metric creation failed");

    // =========================================================================
    // CORRECTION BUS METRICS (Subsystem 1)
    // =========================================================================

    /// Operator calls by operation and outcome
    pub static ref CORRECTION_OPS: IntCounterVec = IntCounterVec::new(
        Opts::new("relayer_correction_ops_total", "Operator correction calls"),
        &["op", "outcome"]  // op: patch/skip/check_skip, outcome: ok/invalid/store_error
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Sampler
        Box::new(CHAIN_HEIGHT.clone()),
        Box::new(HEIGHT_LAG.clone()),
        Box::new(QUEUE_SIZE.clone()),
        Box::new(DELAYED_QUEUE_SIZE.clone()),
        Box::new(SAMPLER_TICK_DURATION.clone()),
        // Correction bus
        Box::new(CORRECTION_OPS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Set an integer gauge from an unsigned reading, saturating at `i64::MAX`.
pub fn set_gauge(gauge: &IntGauge, value: u64) {
    gauge.set(i64::try_from(value).unwrap_or(i64::MAX));
}

/// Count one operator call.
pub fn record_correction_op(op: &str, outcome: &str) {
    CORRECTION_OPS.with_label_values(&[op, outcome]).inc();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
