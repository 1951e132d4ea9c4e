//! # Key Layout
//!
//! Store keys shared with relay workers. Changing any of these breaks the
//! workers reading the same store.

use shared_types::{ChainId, HeightKind, QueueDirection, TxIdentity};

/// Namespace prefix for every relayer key.
pub const KEY_PREFIX: &str = "relayer";

/// Global retry/backoff queue, not partitioned by chain.
pub const DELAYED_QUEUE_KEY: &str = "relayer:queue:delayed";

/// Correction record for an identity.
pub fn patch_key(identity: &TxIdentity) -> String {
    format!("{}:patch:{}", KEY_PREFIX, identity.key_suffix())
}

/// Skip record for an identity.
pub fn skip_key(identity: &TxIdentity) -> String {
    format!("{}:skip:{}", KEY_PREFIX, identity.key_suffix())
}

/// Per-chain, per-direction relay queue.
pub fn queue_key(chain: ChainId, direction: QueueDirection) -> String {
    format!("{}:queue:{}:{}", KEY_PREFIX, chain, direction.as_str())
}

/// Height counter maintained by the chain listeners.
pub fn height_key(chain: ChainId, kind: HeightKind) -> String {
    format!("{}:height:{}:{}", KEY_PREFIX, chain, kind.as_str())
}
