//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Chains**: [`ChainId`], [`ChainDescriptor`]
//! - **Transactions**: [`Tx`], the unit of correction
//! - **Counters**: [`QueueDirection`], [`HeightKind`]

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: CHAINS
// =============================================================================

/// Numeric chain identifier. `0` is reserved for the poly chain.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// The central poly chain every source chain relays through.
    pub const POLY: ChainId = ChainId(0);

    /// Whether this selector addresses the poly chain.
    pub fn is_poly(&self) -> bool {
        *self == Self::POLY
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId(id)
    }
}

/// A configured chain: numeric id plus display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDescriptor {
    /// Chain id.
    pub id: ChainId,
    /// Human readable name, e.g. `Ethereum` or `Heco(Huobi)`.
    pub name: String,
}

impl ChainDescriptor {
    /// Create a new descriptor.
    pub fn new(id: impl Into<ChainId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Name usable inside a metric path: parentheses are stripped.
    pub fn metric_name(&self) -> String {
        self.name.replace(['(', ')'], "")
    }
}

// =============================================================================
// CLUSTER B: QUEUES AND HEIGHTS
// =============================================================================

/// Direction of a per-chain relay queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueDirection {
    /// Transactions picked up on the source chain, heading to poly.
    Source,
    /// Transactions confirmed on poly, heading to the destination chain.
    Poly,
}

impl QueueDirection {
    /// Short tag used in store keys and metric names.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueDirection::Source => "src",
            QueueDirection::Poly => "poly",
        }
    }
}

/// Which height counter of a chain is being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightKind {
    /// Latest height reported by the chain node.
    Node,
    /// Height up to which headers have been synced to poly.
    Header,
    /// Height up to which transactions have been relayed.
    Tx,
}

impl HeightKind {
    /// All height kinds in sampling order.
    pub const ALL: [HeightKind; 3] = [HeightKind::Node, HeightKind::Header, HeightKind::Tx];

    /// Short tag used in store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightKind::Node => "node",
            HeightKind::Header => "header",
            HeightKind::Tx => "tx",
        }
    }
}

// =============================================================================
// CLUSTER C: TRANSACTIONS
// =============================================================================

/// A cross-chain transaction as seen by the control plane.
///
/// Only the identity pair selected by the caller's chain selector matters for
/// addressing; every other field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tx {
    /// Source-chain transaction hash.
    pub src_hash: String,
    /// Source-chain block height.
    pub src_height: u64,
    /// Poly-chain transaction hash.
    pub poly_hash: String,
    /// Poly-chain block height.
    pub poly_height: u64,
    /// Operator override of the destination gas price (legacy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_price: Option<String>,
    /// Operator override of the destination gas price (EIP-1559 style).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_price_x: Option<String>,
    /// Operator override of the destination gas limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_limit: Option<u64>,
    /// Relay workers bypass the fee sufficiency check when set.
    pub skip_check_fee: bool,
    /// Query result only: whether the tx is marked skipped.
    pub skipped: bool,
}

impl Tx {
    /// Build the sparse tx an operator request describes.
    ///
    /// The poly selector fills the poly coordinates, any other selector
    /// fills the source coordinates.
    pub fn for_selector(selector: ChainId, height: u64, hash: impl Into<String>) -> Self {
        let hash = hash.into();
        if selector.is_poly() {
            Tx {
                poly_height: height,
                poly_hash: hash,
                ..Default::default()
            }
        } else {
            Tx {
                src_height: height,
                src_hash: hash,
                ..Default::default()
            }
        }
    }

    /// JSON body used in logs.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
