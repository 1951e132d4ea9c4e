//! # Relayer Telemetry
//!
//! Observability for the relayer control plane.
//!
//! ## Components
//!
//! - **Logs**: `tracing` with an env filter, plain or JSON output
//! - **Traces**: OpenTelemetry OTLP export, only when an endpoint is configured
//! - **Metrics**: Prometheus registry scraped from `/metrics`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relayer_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Guard flushes pending spans on drop
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RELAYER_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `RELAYER_JSON_LOGS` | `false` | JSON log lines |
//! | `OTEL_SERVICE_NAME` | `poly-relayer` | Service name in traces |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset | Enables OTLP trace export |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, record_correction_op, register_metrics, set_gauge, CHAIN_HEIGHT,
    CORRECTION_OPS, DELAYED_QUEUE_SIZE, HEIGHT_LAG, QUEUE_SIZE, REGISTRY, SAMPLER_TICK_DURATION,
};
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// OTLP pipeline could not be built.
    #[error("Failed to initialize OpenTelemetry tracer: {0}")]
    TracerInit(String),

    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics and install the global subscriber.
///
/// Hold the returned guard for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    let tracing = init_tracing(&config)?;
    Ok(TelemetryGuard { _tracing: tracing })
}

/// Guard that keeps telemetry active. Drop to flush.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
