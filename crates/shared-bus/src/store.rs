//! # Shared Store Port
//!
//! The abstract key-value contract the control plane needs from the store it
//! shares with relay workers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from shared store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be reached or rejected the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The caller's deadline fired before the call completed.
    #[error("Store call exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),

    /// The caller cancelled the request before the call completed.
    #[error("Store call cancelled")]
    Cancelled,

    /// A stored value could not be encoded or decoded.
    #[error("Codec error for key {key}: {message}")]
    Codec { key: String, message: String },
}

/// Shared external store used by the control plane and relay workers.
///
/// Production: `RedisSharedStore` (feature `redis`)
/// Testing: `InMemorySharedStore`
///
/// Single-key operations are atomic; nothing else is guaranteed.
#[async_trait]
pub trait SharedStore: Send + Sync {
    /// Get a value by key. Absence is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite the value at `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Number of pending entries in the queue at `queue`. Missing queue is 0.
    async fn len(&self, queue: &str) -> Result<u64, StoreError>;

    /// Append an entry to the queue at `queue`.
    async fn push(&self, queue: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Read and decode a JSON value.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn SharedStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        None => Ok(None),
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Codec {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}

/// Encode a value as JSON and overwrite `key` with it.
pub async fn set_json<T: Serialize + Sync>(
    store: &dyn SharedStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Codec {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &bytes).await
}
