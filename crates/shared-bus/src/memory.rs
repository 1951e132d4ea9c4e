//! # In-Memory Shared Store
//!
//! Single-process stand-in for the shared store. Each operation takes one
//! lock for one key, which mirrors the single-key atomicity of the real store.
//! Carries fault injection hooks so callers can exercise unavailability.

use crate::store::{SharedStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// In-memory implementation of [`SharedStore`].
#[derive(Default)]
pub struct InMemorySharedStore {
    /// Plain key/value records.
    values: RwLock<HashMap<String, Vec<u8>>>,
    /// Ordered queues.
    queues: RwLock<HashMap<String, VecDeque<Vec<u8>>>>,
    /// Whole store unreachable.
    offline: AtomicBool,
    /// Individual keys that fail every call.
    unavailable: RwLock<HashSet<String>>,
    /// Artificial latency applied before every operation.
    latency: Option<Duration>,
    /// Total successful writes (set + push).
    writes: AtomicU64,
}

impl InMemorySharedStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that sleeps `latency` before every operation.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Make every call fail with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make every call touching `key` fail.
    pub fn mark_unavailable(&self, key: impl Into<String>) {
        self.unavailable.write().insert(key.into());
    }

    /// Undo [`Self::mark_unavailable`].
    pub fn restore(&self, key: &str) {
        self.unavailable.write().remove(key);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of plain records stored.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.values.read().len()
    }

    async fn check(&self, key: &str) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        if self.unavailable.read().contains(key) {
            return Err(StoreError::Unavailable(format!("key {} unreachable", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl SharedStore for InMemorySharedStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check(key).await?;
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check(key).await?;
        self.values.write().insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn len(&self, queue: &str) -> Result<u64, StoreError> {
        self.check(queue).await?;
        Ok(self
            .queues
            .read()
            .get(queue)
            .map(|q| q.len() as u64)
            .unwrap_or(0))
    }

    async fn push(&self, queue: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check(queue).await?;
        self.queues
            .write()
            .entry(queue.to_string())
            .or_default()
            .push_back(value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
