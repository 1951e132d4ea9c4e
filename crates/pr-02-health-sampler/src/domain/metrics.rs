//! # Metric Names
//!
//! Observation naming and lag derivation. Names are dotted paths ending in
//! the chain's metric-safe display name, e.g. `height_diff.tx_sync.Ethereum`.

use shared_types::{HeightKind, QueueDirection};
use std::fmt;

/// Lag between a chain's node height and a sync cursor.
///
/// `None` when the node height is 0 (unreadable): no lag is reported rather
/// than a spurious full-height lag. Otherwise clamped at 0, since a sync
/// cursor read after the node height may momentarily be ahead of it.
pub fn derive_lag(node_height: u64, sync_height: u64) -> Option<u64> {
    if node_height == 0 {
        return None;
    }
    Some(node_height.saturating_sub(sync_height))
}

/// Name of one emitted observation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetricName {
    /// `height.node.{chain}`, `height.header_sync.{chain}`, `height.tx_sync.{chain}`
    Height {
        /// Chain metric name.
        chain: String,
        /// Which height.
        kind: HeightKind,
    },
    /// `height_diff.header_sync.{chain}`, `height_diff.tx_sync.{chain}`
    Lag {
        /// Chain metric name.
        chain: String,
        /// Sync cursor the lag is measured against (`Header` or `Tx`).
        kind: HeightKind,
    },
    /// `queue_size.src.{chain}`, `queue_size.poly.{chain}`
    QueueSize {
        /// Chain metric name.
        chain: String,
        /// Queue direction.
        direction: QueueDirection,
    },
    /// `queue_size.delayed`
    DelayedQueueSize,
}

impl MetricName {
    /// Chain the metric belongs to, if any.
    pub fn chain(&self) -> Option<&str> {
        match self {
            MetricName::Height { chain, .. }
            | MetricName::Lag { chain, .. }
            | MetricName::QueueSize { chain, .. } => Some(chain),
            MetricName::DelayedQueueSize => None,
        }
    }
}

fn height_segment(kind: HeightKind) -> &'static str {
    match kind {
        HeightKind::Node => "node",
        HeightKind::Header => "header_sync",
        HeightKind::Tx => "tx_sync",
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricName::Height { chain, kind } => {
                write!(f, "height.{}.{}", height_segment(*kind), chain)
            }
            MetricName::Lag { chain, kind } => {
                write!(f, "height_diff.{}.{}", height_segment(*kind), chain)
            }
            MetricName::QueueSize { chain, direction } => {
                write!(f, "queue_size.{}.{}", direction.as_str(), chain)
            }
            MetricName::DelayedQueueSize => f.write_str("queue_size.delayed"),
        }
    }
}

/// One named value emitted during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// What was measured.
    pub metric: MetricName,
    /// Measured value.
    pub value: u64,
}

impl Observation {
    /// Create an observation.
    pub fn new(metric: MetricName, value: u64) -> Self {
        Self { metric, value }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.metric, self.value)
    }
}
