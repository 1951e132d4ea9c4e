//! # Correction Flows
//!
//! Operator patches and skips, read back the way a relay worker reads them.
//!
//! ```text
//! operator ──patch/skip──→ CorrectionStore / SkipGate ──→ shared store
//!                                                            │
//! relay worker ←──fetch / check_skip─────────────────────────┘
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pr_01_correction_bus::{
        BusError, CorrectionApi, CorrectionStore, PatchRecord, SkipApi, SkipGate,
    };
    use shared_bus::{InMemorySharedStore, RequestContext, SharedStore, StoreError};
    use shared_types::{ChainId, Tx, TxIdentity};

    const ETHEREUM: ChainId = ChainId(2);

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Bus {
        store: Arc<InMemorySharedStore>,
        corrections: Arc<CorrectionStore>,
        skips: Arc<SkipGate>,
    }

    fn bus() -> Bus {
        bus_over(InMemorySharedStore::new())
    }

    fn bus_over(store: InMemorySharedStore) -> Bus {
        let store = Arc::new(store);
        let shared: Arc<dyn SharedStore> = store.clone();
        Bus {
            corrections: Arc::new(CorrectionStore::new(shared.clone())),
            skips: Arc::new(SkipGate::new(shared)),
            store,
        }
    }

    /// A tx as a relay worker holds it: both coordinate pairs filled.
    fn worker_tx() -> Tx {
        Tx {
            src_hash: "0xsrc".into(),
            src_height: 55,
            poly_hash: "0xabc".into(),
            poly_height: 1000,
            ..Default::default()
        }
    }

    fn with_overrides(mut tx: Tx, price: &str, limit: u64) -> Tx {
        tx.dst_gas_price = Some(price.into());
        tx.dst_gas_limit = Some(limit);
        tx
    }

    fn ctx() -> RequestContext {
        RequestContext::background()
    }

    // =============================================================================
    // PATCH
    // =============================================================================

    #[tokio::test]
    async fn test_patch_gas_limit_then_get() {
        let bus = bus();
        let tx = Tx {
            dst_gas_limit: Some(300_000),
            ..Tx::for_selector(ChainId::POLY, 1000, "0xabc")
        };
        bus.corrections.patch(&ctx(), ChainId::POLY, &tx).await.unwrap();

        let query = Tx::for_selector(ChainId::POLY, 1000, "0xabc");
        let record = bus
            .corrections
            .get_patch(&ctx(), ChainId::POLY, &query)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.dst_gas_limit, Some(300_000));
    }

    #[tokio::test]
    async fn test_poly_selector_ignores_source_fields() {
        let bus = bus();
        let patched = with_overrides(worker_tx(), "20", 250_000);
        let identity = bus
            .corrections
            .patch(&ctx(), ChainId::POLY, &patched)
            .await
            .unwrap();
        assert_eq!(identity, TxIdentity::resolve(ChainId::POLY, &worker_tx()));

        // Same poly pair, unrelated source pair: same record.
        let other_source = Tx {
            src_hash: "0xother".into(),
            src_height: 1,
            ..worker_tx()
        };
        let found = bus
            .corrections
            .get_patch(&ctx(), ChainId::POLY, &other_source)
            .await
            .unwrap();
        assert!(found.is_some());

        // The source pair was never patched.
        let by_source = bus
            .corrections
            .get_patch(&ctx(), ETHEREUM, &worker_tx())
            .await
            .unwrap();
        assert_eq!(by_source, None);
    }

    #[tokio::test]
    async fn test_same_patch_twice_is_unchanged() {
        let bus = bus();
        let tx = with_overrides(worker_tx(), "20", 250_000);

        bus.corrections.patch(&ctx(), ETHEREUM, &tx).await.unwrap();
        let first = bus.corrections.get_patch(&ctx(), ETHEREUM, &tx).await.unwrap();
        bus.corrections.patch(&ctx(), ETHEREUM, &tx).await.unwrap();
        let second = bus.corrections.get_patch(&ctx(), ETHEREUM, &tx).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(bus.store.record_count(), 1);
    }

    #[tokio::test]
    async fn test_second_patch_replaces_first() {
        let bus = bus();
        let p1 = with_overrides(worker_tx(), "20", 250_000);
        let p2 = Tx {
            dst_gas_price_x: Some("35".into()),
            skip_check_fee: true,
            ..worker_tx()
        };

        bus.corrections.patch(&ctx(), ETHEREUM, &p1).await.unwrap();
        bus.corrections.patch(&ctx(), ETHEREUM, &p2).await.unwrap();

        let record = bus
            .corrections
            .get_patch(&ctx(), ETHEREUM, &worker_tx())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record, PatchRecord::from_tx(&p2).unwrap());
        assert_eq!(record.dst_gas_price, None);
        assert_eq!(record.dst_gas_limit, None);
    }

    #[tokio::test]
    async fn test_worker_applies_patch() {
        let bus = bus();
        bus.corrections
            .patch(&ctx(), ChainId::POLY, &with_overrides(worker_tx(), "42", 500_000))
            .await
            .unwrap();

        // Worker side: resolve by the coordinates it tracks, then overlay.
        let mut tx = worker_tx();
        let identity = TxIdentity::resolve(ChainId::POLY, &tx);
        if let Some(record) = bus.corrections.fetch(&ctx(), &identity).await.unwrap() {
            record.apply_to(&mut tx);
        }
        assert_eq!(tx.dst_gas_price.as_deref(), Some("42"));
        assert_eq!(tx.dst_gas_limit, Some(500_000));
        assert_eq!(tx.poly_hash, "0xabc");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sequential_patches_from_two_callers() {
        let bus = bus();
        let p1 = with_overrides(worker_tx(), "10", 100_000);
        let p2 = Tx {
            dst_gas_price_x: Some("99".into()),
            ..worker_tx()
        };

        let corrections = bus.corrections.clone();
        let first = p1.clone();
        tokio::spawn(async move { corrections.patch(&ctx(), ETHEREUM, &first).await })
            .await
            .unwrap()
            .unwrap();
        let corrections = bus.corrections.clone();
        let second = p2.clone();
        tokio::spawn(async move { corrections.patch(&ctx(), ETHEREUM, &second).await })
            .await
            .unwrap()
            .unwrap();

        let record = bus
            .corrections
            .get_patch(&ctx(), ETHEREUM, &worker_tx())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record, PatchRecord::from_tx(&p2).unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_patches_never_mix_fields() {
        let bus = bus();
        let candidates: Vec<Tx> = (1..=16u64)
            .map(|i| with_overrides(worker_tx(), &i.to_string(), i * 1_000))
            .collect();

        let handles: Vec<_> = candidates
            .iter()
            .cloned()
            .map(|tx| {
                let corrections = bus.corrections.clone();
                tokio::spawn(async move { corrections.patch(&ctx(), ETHEREUM, &tx).await })
            })
            .collect();
        for handle in futures::future::join_all(handles).await {
            handle.unwrap().unwrap();
        }

        let record = bus
            .corrections
            .get_patch(&ctx(), ETHEREUM, &worker_tx())
            .await
            .unwrap()
            .unwrap();
        assert!(candidates
            .iter()
            .any(|tx| PatchRecord::from_tx(tx).unwrap() == record));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_aborts_patch_without_side_effects() {
        let bus = bus_over(InMemorySharedStore::with_latency(Duration::from_millis(50)));
        let deadline = RequestContext::with_timeout(Duration::from_millis(10));

        let err = bus
            .corrections
            .patch(&deadline, ETHEREUM, &with_overrides(worker_tx(), "1", 1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            BusError::Store(StoreError::DeadlineExceeded(Duration::from_millis(10)))
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(bus.store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_store() {
        let bus = bus();
        let no_hash = Tx::for_selector(ETHEREUM, 55, "");
        let bad_price = Tx {
            dst_gas_price: Some("-5".into()),
            ..worker_tx()
        };

        assert!(bus
            .corrections
            .patch(&ctx(), ETHEREUM, &no_hash)
            .await
            .unwrap_err()
            .is_invalid_input());
        assert!(bus
            .corrections
            .patch(&ctx(), ETHEREUM, &bad_price)
            .await
            .unwrap_err()
            .is_invalid_input());
        assert!(bus
            .skips
            .skip(&ctx(), ETHEREUM, &no_hash)
            .await
            .unwrap_err()
            .is_invalid_input());
        assert_eq!(bus.store.write_count(), 0);
    }

    // =============================================================================
    // SKIP
    // =============================================================================

    #[tokio::test]
    async fn test_skip_then_check_skip() {
        let bus = bus();
        let x = Tx::for_selector(ETHEREUM, 55, "0xsrc");
        let y = Tx::for_selector(ETHEREUM, 56, "0xuntouched");

        bus.skips.skip(&ctx(), ETHEREUM, &x).await.unwrap();

        assert!(bus.skips.check_skip(&ctx(), ETHEREUM, &x).await.unwrap());
        assert!(!bus.skips.check_skip(&ctx(), ETHEREUM, &y).await.unwrap());
    }

    #[tokio::test]
    async fn test_repeated_skip_stays_skipped() {
        let bus = bus();
        let x = Tx::for_selector(ChainId::POLY, 1000, "0xabc");

        for _ in 0..3 {
            bus.skips.skip(&ctx(), ChainId::POLY, &x).await.unwrap();
            assert!(bus.skips.check_skip(&ctx(), ChainId::POLY, &x).await.unwrap());
        }

        let writes = bus.store.write_count();
        let first = bus.skips.check_skip(&ctx(), ChainId::POLY, &x).await.unwrap();
        let second = bus.skips.check_skip(&ctx(), ChainId::POLY, &x).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(bus.store.write_count(), writes);
    }

    #[tokio::test]
    async fn test_skip_and_patch_are_independent() {
        let bus = bus();
        let tx = with_overrides(worker_tx(), "20", 250_000);

        bus.skips.skip(&ctx(), ETHEREUM, &tx).await.unwrap();
        assert_eq!(
            bus.corrections.get_patch(&ctx(), ETHEREUM, &tx).await.unwrap(),
            None
        );

        bus.corrections.patch(&ctx(), ETHEREUM, &tx).await.unwrap();
        bus.skips.unskip(&ctx(), ETHEREUM, &tx).await.unwrap();
        assert!(!bus.skips.check_skip(&ctx(), ETHEREUM, &tx).await.unwrap());
        assert!(bus
            .corrections
            .get_patch(&ctx(), ETHEREUM, &tx)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_worker_check_fills_skipped() {
        let bus = bus();
        bus.skips.skip(&ctx(), ChainId::POLY, &worker_tx()).await.unwrap();

        let tx = bus.skips.check(&ctx(), ChainId::POLY, worker_tx()).await.unwrap();
        assert!(tx.skipped);
        let tx = bus.skips.check(&ctx(), ETHEREUM, worker_tx()).await.unwrap();
        assert!(!tx.skipped);
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_to_caller() {
        let bus = bus();
        bus.store.set_offline(true);

        let err = bus
            .skips
            .check_skip(&ctx(), ETHEREUM, &worker_tx())
            .await
            .unwrap_err();
        assert!(matches!(err, BusError::Store(StoreError::Unavailable(_))));

        bus.store.set_offline(false);
        assert!(!bus.skips.check_skip(&ctx(), ETHEREUM, &worker_tx()).await.unwrap());
    }
}
