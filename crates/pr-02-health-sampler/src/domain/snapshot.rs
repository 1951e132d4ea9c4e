//! # Tick Snapshots
//!
//! What one tick saw. Observations are derived from the snapshot so that a
//! tick's emitted values and its returned summary can never disagree.

use crate::domain::metrics::{derive_lag, MetricName, Observation};
use shared_types::{ChainDescriptor, HeightKind, QueueDirection};
use std::time::Duration;

/// Readings for one chain in one tick. Failed reads are recorded as 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainHealth {
    /// Chain sampled.
    pub chain: ChainDescriptor,
    /// Latest node height.
    pub node_height: u64,
    /// Latest synced header height.
    pub header_height: u64,
    /// Latest synced tx height.
    pub tx_height: u64,
    /// Source-inbound queue depth.
    pub src_queue: u64,
    /// Poly-inbound queue depth.
    pub poly_queue: u64,
    /// Number of reads that failed and were degraded to 0.
    pub failed_reads: u32,
}

impl ChainHealth {
    /// Header lag; `None` when the node height is unknown.
    pub fn header_lag(&self) -> Option<u64> {
        derive_lag(self.node_height, self.header_height)
    }

    /// Tx lag; `None` when the node height is unknown.
    pub fn tx_lag(&self) -> Option<u64> {
        derive_lag(self.node_height, self.tx_height)
    }

    /// Lag kinds with no observation this tick.
    pub fn suppressed_lags(&self) -> Vec<HeightKind> {
        let mut out = Vec::new();
        if self.header_lag().is_none() {
            out.push(HeightKind::Header);
        }
        if self.tx_lag().is_none() {
            out.push(HeightKind::Tx);
        }
        out
    }

    /// Observations for this chain in emission order.
    pub fn observations(&self) -> Vec<Observation> {
        let chain = self.chain.metric_name();
        let height = |kind| MetricName::Height { chain: chain.clone(), kind };
        let lag = |kind| MetricName::Lag { chain: chain.clone(), kind };
        let queue = |direction| MetricName::QueueSize { chain: chain.clone(), direction };

        let mut out = vec![
            Observation::new(height(HeightKind::Node), self.node_height),
            Observation::new(height(HeightKind::Header), self.header_height),
            Observation::new(height(HeightKind::Tx), self.tx_height),
        ];
        if let Some(value) = self.header_lag() {
            out.push(Observation::new(lag(HeightKind::Header), value));
        }
        if let Some(value) = self.tx_lag() {
            out.push(Observation::new(lag(HeightKind::Tx), value));
        }
        out.push(Observation::new(queue(QueueDirection::Source), self.src_queue));
        out.push(Observation::new(queue(QueueDirection::Poly), self.poly_queue));
        out
    }
}

/// Result of one full tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthSnapshot {
    /// One entry per configured chain.
    pub chains: Vec<ChainHealth>,
    /// Global delayed queue depth.
    pub delayed_queue: u64,
    /// Wall-clock duration of the tick.
    pub elapsed: Duration,
}

impl HealthSnapshot {
    /// Every observation of the tick: per-chain first, delayed depth last.
    pub fn observations(&self) -> Vec<Observation> {
        let mut out: Vec<Observation> = self
            .chains
            .iter()
            .flat_map(ChainHealth::observations)
            .collect();
        out.push(Observation::new(MetricName::DelayedQueueSize, self.delayed_queue));
        out
    }

    /// Readings for the chain with `id`.
    pub fn chain(&self, id: impl Into<shared_types::ChainId>) -> Option<&ChainHealth> {
        let id = id.into();
        self.chains.iter().find(|c| c.chain.id == id)
    }

    /// Reads that failed across all chains.
    pub fn failed_reads(&self) -> u32 {
        self.chains.iter().map(|c| c.failed_reads).sum()
    }
}
