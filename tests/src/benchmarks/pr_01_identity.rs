//! # PR-01 Correction Bus Benchmarks
//!
//! - Identity resolution is pure and runs on every worker lookup.
//! - A patch is one validated write; a skip check is one read.

use std::sync::Arc;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use pr_01_correction_bus::{CorrectionApi, CorrectionStore, SkipApi, SkipGate};
use shared_bus::{InMemorySharedStore, RequestContext, SharedStore};
use shared_types::{ChainId, Tx, TxIdentity};

fn sample_tx(i: u64) -> Tx {
    Tx {
        src_hash: format!("0x{:064x}", i),
        src_height: 19_000_000 + i,
        poly_hash: format!("0x{:064x}", i.wrapping_mul(31)),
        poly_height: 30_000_000 + i,
        dst_gas_limit: Some(300_000),
        ..Default::default()
    }
}

pub fn bench_identity_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("pr-01-identity");
    let tx = sample_tx(7);

    for selector in [ChainId::POLY, ChainId(2)] {
        group.bench_with_input(
            BenchmarkId::new("resolve", selector.0),
            &selector,
            |b, selector| b.iter(|| black_box(TxIdentity::resolve(*selector, &tx)).key_suffix()),
        );
    }

    let txs: Vec<Tx> = (0..1_000).map(sample_tx).collect();
    group.throughput(Throughput::Elements(txs.len() as u64));
    group.bench_function("resolve_and_validate_1000", |b| {
        b.iter(|| {
            for tx in &txs {
                let identity = TxIdentity::resolve(ChainId::POLY, tx);
                black_box(identity.validate().is_ok());
            }
        })
    });
    group.finish();
}

pub fn bench_patch_and_check(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let store: Arc<dyn SharedStore> = Arc::new(InMemorySharedStore::new());
    let corrections = CorrectionStore::new(store.clone());
    let skips = SkipGate::new(store);
    let ctx = RequestContext::background();
    let tx = sample_tx(42);

    let mut group = c.benchmark_group("pr-01-bus");
    group.bench_function("patch", |b| {
        b.to_async(&runtime)
            .iter(|| async { corrections.patch(&ctx, ChainId::POLY, &tx).await.is_ok() })
    });
    group.bench_function("check_skip", |b| {
        b.to_async(&runtime)
            .iter(|| async { skips.check_skip(&ctx, ChainId::POLY, &tx).await.is_ok() })
    });
    group.finish();
}
