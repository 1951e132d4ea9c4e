//! # Health Flows
//!
//! Chain listeners publish heights and relay workers fill queues in the
//! shared store; the sampler turns both into one tick of observations.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use pr_02_health_sampler::{
        ChainHeightSource, HealthSampler, RecordingSink, SampleError, StoreHeightSource,
        StoreQueueDepth,
    };
    use shared_bus::keys::{queue_key, DELAYED_QUEUE_KEY};
    use shared_bus::{InMemorySharedStore, SharedStore};
    use shared_types::{ChainDescriptor, ChainId, HeightKind, QueueDirection};
    use tokio::sync::watch;

    const ETHEREUM: ChainId = ChainId(2);
    const BSC: ChainId = ChainId(6);

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn chains() -> Vec<ChainDescriptor> {
        vec![
            ChainDescriptor::new(ETHEREUM, "Ethereum"),
            ChainDescriptor::new(BSC, "BSC"),
        ]
    }

    struct Relayer {
        store: Arc<InMemorySharedStore>,
        heights: Arc<StoreHeightSource>,
        sink: Arc<RecordingSink>,
        sampler: HealthSampler,
    }

    fn relayer() -> Relayer {
        let store = Arc::new(InMemorySharedStore::new());
        let shared: Arc<dyn SharedStore> = store.clone();
        let heights = Arc::new(StoreHeightSource::new(shared.clone()));
        let sink = Arc::new(RecordingSink::new());
        let sampler = HealthSampler::new(
            chains(),
            heights.clone(),
            Arc::new(StoreQueueDepth::new(shared)),
            sink.clone(),
        );
        Relayer {
            store,
            heights,
            sink,
            sampler,
        }
    }

    async fn publish(relayer: &Relayer, chain: ChainId, node: u64, header: u64, tx: u64) {
        for (kind, height) in [
            (HeightKind::Node, node),
            (HeightKind::Header, header),
            (HeightKind::Tx, tx),
        ] {
            relayer.heights.record_height(chain, kind, height).await.unwrap();
        }
    }

    async fn enqueue(store: &InMemorySharedStore, queue: &str, count: usize) {
        for i in 0..count {
            store.push(queue, format!("msg-{i}").as_bytes()).await.unwrap();
        }
    }

    // =============================================================================
    // TICK
    // =============================================================================

    #[tokio::test]
    async fn test_tick_reports_heights_lags_and_queues() {
        let relayer = relayer();
        publish(&relayer, ETHEREUM, 1_000, 990, 950).await;
        publish(&relayer, BSC, 500, 500, 480).await;
        enqueue(&relayer.store, &queue_key(ETHEREUM, QueueDirection::Source), 3).await;
        enqueue(&relayer.store, &queue_key(BSC, QueueDirection::Poly), 2).await;
        enqueue(&relayer.store, DELAYED_QUEUE_KEY, 4).await;

        let snapshot = relayer.sampler.sample_once().await;
        let sink = &relayer.sink;

        assert_eq!(snapshot.failed_reads(), 0);
        assert_eq!(sink.value_of("height.node.Ethereum"), Some(1_000));
        assert_eq!(sink.value_of("height_diff.header_sync.Ethereum"), Some(10));
        assert_eq!(sink.value_of("height_diff.tx_sync.Ethereum"), Some(50));
        assert_eq!(sink.value_of("height_diff.tx_sync.BSC"), Some(20));
        assert_eq!(sink.value_of("queue_size.src.Ethereum"), Some(3));
        assert_eq!(sink.value_of("queue_size.poly.BSC"), Some(2));
        assert_eq!(sink.value_of("queue_size.delayed"), Some(4));
        assert_eq!(sink.tick_count(), 1);
    }

    #[tokio::test]
    async fn test_sync_ahead_of_node_clamps_to_zero() {
        let relayer = relayer();
        publish(&relayer, ETHEREUM, 100, 120, 100).await;

        relayer.sampler.sample_once().await;

        assert_eq!(relayer.sink.value_of("height_diff.header_sync.Ethereum"), Some(0));
    }

    #[tokio::test]
    async fn test_unpublished_chain_has_no_lag() {
        let relayer = relayer();
        publish(&relayer, ETHEREUM, 1_000, 990, 950).await;

        relayer.sampler.sample_once().await;

        assert_eq!(relayer.sink.value_of("height.node.BSC"), Some(0));
        assert_eq!(relayer.sink.value_of("height_diff.header_sync.BSC"), None);
        assert_eq!(relayer.sink.value_of("height_diff.tx_sync.BSC"), None);
        assert!(relayer.sink.value_of("height_diff.header_sync.Ethereum").is_some());
    }

    #[tokio::test]
    async fn test_queue_failure_on_one_chain_is_isolated() {
        let relayer = relayer();
        publish(&relayer, ETHEREUM, 1_000, 990, 950).await;
        publish(&relayer, BSC, 500, 490, 480).await;
        enqueue(&relayer.store, &queue_key(ETHEREUM, QueueDirection::Source), 3).await;
        enqueue(&relayer.store, &queue_key(BSC, QueueDirection::Source), 7).await;
        enqueue(&relayer.store, DELAYED_QUEUE_KEY, 2).await;
        relayer
            .store
            .mark_unavailable(queue_key(ETHEREUM, QueueDirection::Source));

        let snapshot = relayer.sampler.sample_once().await;

        assert_eq!(snapshot.failed_reads(), 1);
        assert_eq!(relayer.sink.value_of("queue_size.src.Ethereum"), Some(0));
        assert_eq!(relayer.sink.value_of("height_diff.header_sync.Ethereum"), Some(10));
        assert_eq!(relayer.sink.value_of("queue_size.src.BSC"), Some(7));
        assert_eq!(relayer.sink.value_of("height_diff.tx_sync.BSC"), Some(20));
        assert_eq!(relayer.sink.value_of("queue_size.delayed"), Some(2));
    }

    #[tokio::test]
    async fn test_store_outage_still_completes_tick() {
        let relayer = relayer();
        relayer.store.set_offline(true);

        let snapshot = relayer.sampler.sample_once().await;

        assert_eq!(snapshot.chains.len(), 2);
        assert_eq!(snapshot.failed_reads(), 10);
        assert_eq!(relayer.sink.tick_count(), 1);
        assert_eq!(relayer.sink.value_of("queue_size.delayed"), Some(0));
    }

    /// Height source whose Ethereum reads never return.
    struct StuckEthereum {
        inner: Arc<StoreHeightSource>,
    }

    #[async_trait]
    impl ChainHeightSource for StuckEthereum {
        async fn height(&self, chain: ChainId, kind: HeightKind) -> Result<u64, SampleError> {
            if chain == ETHEREUM {
                std::future::pending::<()>().await;
            }
            self.inner.height(chain, kind).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_chain_does_not_stall_others() {
        let store = Arc::new(InMemorySharedStore::new());
        let shared: Arc<dyn SharedStore> = store.clone();
        let heights = Arc::new(StoreHeightSource::new(shared.clone()));
        heights.record_height(BSC, HeightKind::Node, 500).await.unwrap();
        heights.record_height(BSC, HeightKind::Header, 490).await.unwrap();
        let sink = Arc::new(RecordingSink::new());
        let sampler = HealthSampler::new(
            chains(),
            Arc::new(StuckEthereum { inner: heights }),
            Arc::new(StoreQueueDepth::new(shared)),
            sink.clone(),
        )
        .with_read_timeout(Duration::from_millis(200));

        let snapshot = sampler.sample_once().await;

        assert_eq!(snapshot.chain(ETHEREUM).unwrap().failed_reads, 3);
        assert_eq!(sink.value_of("height.node.Ethereum"), Some(0));
        assert_eq!(sink.value_of("height_diff.header_sync.Ethereum"), None);
        assert_eq!(sink.value_of("height_diff.header_sync.BSC"), Some(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_follows_published_heights() {
        let relayer = Arc::new(relayer());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = {
            let relayer = relayer.clone();
            tokio::spawn(async move { relayer.sampler.run(shutdown_rx).await })
        };

        publish(&relayer, ETHEREUM, 100, 90, 90).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(relayer.sink.value_of("height_diff.header_sync.Ethereum"), Some(10));

        publish(&relayer, ETHEREUM, 110, 110, 90).await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        relayer.sink.clear();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(relayer.sink.value_of("height_diff.header_sync.Ethereum"), Some(0));
        assert_eq!(relayer.sink.value_of("height_diff.tx_sync.Ethereum"), Some(20));

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }
}
