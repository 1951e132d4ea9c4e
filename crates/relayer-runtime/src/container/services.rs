//! # Services
//!
//! Builds the shared store for the configured backend and wires the
//! correction bus and the health sampler over it.

use crate::container::config::{RelayerConfig, StoreBackend};
use anyhow::Result;
use pr_01_correction_bus::{CorrectionApi, CorrectionStore, SkipApi, SkipGate};
use pr_02_health_sampler::{HealthSampler, MetricsSink, StoreHeightSource, StoreQueueDepth};
use shared_bus::{InMemorySharedStore, RequestContext, SharedStore};
use std::sync::Arc;
use tracing::info;

/// Wired services over one shared store.
pub struct ServiceContainer {
    /// Runtime configuration.
    pub config: RelayerConfig,
    /// Store shared with relay workers.
    pub store: Arc<dyn SharedStore>,
    /// Patch records.
    pub corrections: Arc<CorrectionStore>,
    /// Skip marks.
    pub skips: Arc<SkipGate>,
}

impl ServiceContainer {
    /// Connect to the configured backend and wire services over it.
    pub async fn connect(config: RelayerConfig) -> Result<Self> {
        let store: Arc<dyn SharedStore> = match config.store.backend {
            StoreBackend::Memory => {
                info!("Using in-memory shared store; records are not shared with workers");
                Arc::new(InMemorySharedStore::new())
            }
            StoreBackend::Redis => connect_redis(&config.store.redis_url).await?,
        };
        Ok(Self::with_store(config, store))
    }

    /// Wire services over an existing store.
    pub fn with_store(config: RelayerConfig, store: Arc<dyn SharedStore>) -> Self {
        Self {
            corrections: Arc::new(CorrectionStore::new(Arc::clone(&store))),
            skips: Arc::new(SkipGate::new(Arc::clone(&store))),
            config,
            store,
        }
    }

    /// Correction API handle.
    pub fn correction_api(&self) -> Arc<dyn CorrectionApi> {
        self.corrections.clone()
    }

    /// Skip API handle.
    pub fn skip_api(&self) -> Arc<dyn SkipApi> {
        self.skips.clone()
    }

    /// Context for one operator call, bounded by the configured store timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.config.store_timeout())
    }

    /// Health sampler over the configured chain set, emitting into `sink`.
    pub fn health_sampler(&self, sink: Arc<dyn MetricsSink>) -> HealthSampler {
        HealthSampler::new(
            self.config.chains.clone(),
            Arc::new(StoreHeightSource::new(Arc::clone(&self.store))),
            Arc::new(StoreQueueDepth::new(Arc::clone(&self.store))),
            sink,
        )
    }
}

#[cfg(feature = "redis")]
async fn connect_redis(url: &str) -> Result<Arc<dyn SharedStore>> {
    use anyhow::Context;
    let store = shared_bus::RedisSharedStore::connect(url)
        .await
        .context("Failed to connect to redis shared store")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis(_url: &str) -> Result<Arc<dyn SharedStore>> {
    anyhow::bail!("redis backend requested but relayer-runtime was built without the `redis` feature")
}
