//! # PR-02 Health Sampler
//!
//! Best-effort operability signal for the relayer.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports + Adapters + Service)
//!
//! ## Purpose
//!
//! Every [`SAMPLE_INTERVAL`] the sampler reads, for each configured chain:
//! - node, header-sync and tx-sync heights
//! - source-inbound and poly-inbound queue depths
//!
//! plus the global delayed queue depth once, and emits one named
//! observation per value. Header and tx lag are derived from the heights.
//!
//! ## Failure Model
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Height read fails | That height reads 0; lag for the chain is omitted if it was the node height |
//! | Queue read fails | That depth reads 0 |
//! | Slow chain | Other chains are sampled concurrently and are not held back past the tick |
//!
//! Nothing a read does can abort a tick or stop the task.
//!
//! ## Module Structure
//!
//! ```text
//! pr-02-health-sampler/
//! ├── domain/          # MetricName, Observation, derive_lag, snapshots
//! ├── ports/           # ChainHeightSource, QueueDepthAccessor, MetricsSink
//! ├── adapters/        # Store-backed sources, recording sink
//! └── service/         # HealthSampler
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{RecordingSink, StoreHeightSource, StoreQueueDepth};
pub use domain::{derive_lag, ChainHealth, HealthSnapshot, MetricName, Observation, SampleError};
pub use ports::{ChainHeightSource, MetricsSink, QueueDepthAccessor};
pub use service::{HealthSampler, DEFAULT_READ_TIMEOUT, SAMPLE_INTERVAL};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
