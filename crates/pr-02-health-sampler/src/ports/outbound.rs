//! # Outbound Ports
//!
//! The sampler depends on three collaborators: where heights come from,
//! where queue depths come from, and where observations go.

use crate::domain::{Observation, SampleError};
use async_trait::async_trait;
use shared_types::{ChainId, HeightKind, QueueDirection};
use std::time::Duration;

/// Per-chain height counters.
#[async_trait]
pub trait ChainHeightSource: Send + Sync {
    /// Read one height counter of `chain`.
    async fn height(&self, chain: ChainId, kind: HeightKind) -> Result<u64, SampleError>;

    /// Latest height reported by the chain node.
    async fn latest_node_height(&self, chain: ChainId) -> Result<u64, SampleError> {
        self.height(chain, HeightKind::Node).await
    }

    /// Height up to which headers are synced.
    async fn latest_synced_header_height(&self, chain: ChainId) -> Result<u64, SampleError> {
        self.height(chain, HeightKind::Header).await
    }

    /// Height up to which transactions are relayed.
    async fn latest_synced_tx_height(&self, chain: ChainId) -> Result<u64, SampleError> {
        self.height(chain, HeightKind::Tx).await
    }
}

/// Read-only view of externally maintained relay queues.
#[async_trait]
pub trait QueueDepthAccessor: Send + Sync {
    /// Pending entries in the per-chain queue for `direction`.
    async fn len(&self, chain: ChainId, direction: QueueDirection) -> Result<u64, SampleError>;

    /// Pending entries in the global delayed (retry/backoff) queue.
    async fn len_delayed(&self) -> Result<u64, SampleError>;
}

/// Destination of observations. Recording must not block or fail.
pub trait MetricsSink: Send + Sync {
    /// Record one observation.
    fn record(&self, observation: &Observation);

    /// Record how long a full tick took.
    fn record_tick(&self, _elapsed: Duration) {}

    /// No `kind` lag could be derived for `chain` this tick. Sinks that keep
    /// values across ticks must drop the previous one.
    fn lag_suppressed(&self, _chain: &str, _kind: HeightKind) {}
}
