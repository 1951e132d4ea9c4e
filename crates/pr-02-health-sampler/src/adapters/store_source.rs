//! # Store-Backed Sources
//!
//! Chain listeners publish their height counters into the shared store as
//! decimal text; relay workers maintain their queues as store lists. These
//! adapters read both.

use crate::domain::SampleError;
use crate::ports::{ChainHeightSource, QueueDepthAccessor};
use async_trait::async_trait;
use shared_bus::{keys, SharedStore, StoreError};
use shared_types::{ChainId, HeightKind, QueueDirection};
use std::sync::Arc;

/// Height counters stored under `relayer:height:{chain}:{kind}`.
#[derive(Clone)]
pub struct StoreHeightSource {
    store: Arc<dyn SharedStore>,
}

impl StoreHeightSource {
    /// Create a height source over `store`.
    pub fn new(store: Arc<dyn SharedStore>) -> Self {
        Self { store }
    }

    /// Publish a height. Used by chain listeners.
    pub async fn record_height(
        &self,
        chain: ChainId,
        kind: HeightKind,
        height: u64,
    ) -> Result<(), StoreError> {
        let key = keys::height_key(chain, kind);
        self.store.set(&key, height.to_string().as_bytes()).await
    }
}

#[async_trait]
impl ChainHeightSource for StoreHeightSource {
    async fn height(&self, chain: ChainId, kind: HeightKind) -> Result<u64, SampleError> {
        let key = keys::height_key(chain, kind);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(0);
        };
        let text = String::from_utf8_lossy(&raw);
        text.trim()
            .parse::<u64>()
            .map_err(|_| SampleError::MalformedHeight {
                key,
                value: text.into_owned(),
            })
    }
}

/// Queue depths read as list lengths.
#[derive(Clone)]
pub struct StoreQueueDepth {
    store: Arc<dyn SharedStore>,
}

impl StoreQueueDepth {
    /// Create a queue depth accessor over `store`.
    pub fn new(store: Arc<dyn SharedStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QueueDepthAccessor for StoreQueueDepth {
    async fn len(&self, chain: ChainId, direction: QueueDirection) -> Result<u64, SampleError> {
        Ok(self.store.len(&keys::queue_key(chain, direction)).await?)
    }

    async fn len_delayed(&self) -> Result<u64, SampleError> {
        Ok(self.store.len(keys::DELAYED_QUEUE_KEY).await?)
    }
}
