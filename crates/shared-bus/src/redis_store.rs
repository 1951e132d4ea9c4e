//! # Redis Shared Store
//!
//! Production backend: the same Redis instance the relay workers poll.
//! Records are plain string keys (GET/SET), queues are lists (LLEN/RPUSH).

use crate::store::{SharedStore, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

/// Redis-backed implementation of [`SharedStore`].
///
/// `ConnectionManager` reconnects on its own; a call made while the server is
/// down surfaces as [`StoreError::Unavailable`] and is never retried here.
#[derive(Clone)]
pub struct RedisSharedStore {
    conn: ConnectionManager,
}

impl RedisSharedStore {
    /// Connect to `url` (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = ConnectionManager::new(client).await.map_err(unavailable)?;
        info!(url = %redact(url), "Connected to shared store");
        Ok(Self { conn })
    }
}

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// Strip credentials from a redis URL before logging it.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}://***{}", &url[..scheme], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[async_trait]
impl SharedStore for RedisSharedStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(key).await.map_err(unavailable)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(unavailable)
    }

    async fn len(&self, queue: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        conn.llen::<_, u64>(queue).await.map_err(unavailable)
    }

    async fn push(&self, queue: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(queue, value).await.map_err(unavailable)
    }
}
