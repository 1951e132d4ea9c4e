//! # PR-02 Health Sampler Benchmarks
//!
//! One tick must finish well inside the 2s sampling period, for the default
//! chain set and for a large one.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use pr_02_health_sampler::{HealthSampler, RecordingSink, StoreHeightSource, StoreQueueDepth};
use shared_bus::keys::queue_key;
use shared_bus::{InMemorySharedStore, SharedStore};
use shared_types::{ChainDescriptor, HeightKind, QueueDirection};

async fn seeded_sampler(chain_count: u64) -> HealthSampler {
    let store: Arc<dyn SharedStore> = Arc::new(InMemorySharedStore::new());
    let heights = Arc::new(StoreHeightSource::new(store.clone()));
    let chains: Vec<ChainDescriptor> = (1..=chain_count)
        .map(|id| ChainDescriptor::new(id, format!("Chain{}", id)))
        .collect();

    for chain in &chains {
        let base = 1_000_000 + chain.id.0;
        for (kind, height) in [
            (HeightKind::Node, base),
            (HeightKind::Header, base - 3),
            (HeightKind::Tx, base - 12),
        ] {
            let _ = heights.record_height(chain.id, kind, height).await;
        }
        let _ = store
            .push(&queue_key(chain.id, QueueDirection::Source), b"msg")
            .await;
    }

    HealthSampler::new(
        chains,
        heights,
        Arc::new(StoreQueueDepth::new(store)),
        Arc::new(RecordingSink::new()),
    )
}

pub fn bench_sampler_tick(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("pr-02-sampler");

    for chain_count in [6u64, 64] {
        let sampler = runtime.block_on(seeded_sampler(chain_count));
        group.bench_with_input(
            BenchmarkId::new("tick", chain_count),
            &sampler,
            |b, sampler| b.to_async(&runtime).iter(|| sampler.sample_once()),
        );
    }
    group.finish();
}

