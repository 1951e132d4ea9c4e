//! # Front Door
//!
//! HTTP routes and one-off CLI commands over the same wired container,
//! checked against what a relay worker then reads from the store.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use pr_01_correction_bus::{CorrectionApi, SkipApi};
    use relayer_runtime::cli::{self, Command, TxArgs};
    use relayer_runtime::http::{build_router, AppState};
    use relayer_runtime::{RelayerConfig, ServiceContainer};
    use shared_bus::{InMemorySharedStore, RequestContext};
    use shared_types::{ChainId, Tx};

    fn container() -> (Arc<InMemorySharedStore>, ServiceContainer) {
        let store = Arc::new(InMemorySharedStore::new());
        let container = ServiceContainer::with_store(RelayerConfig::default(), store.clone());
        (store, container)
    }

    async fn get(container: &ServiceContainer, uri: &str) -> (StatusCode, serde_json::Value) {
        let router = build_router(AppState::from_container(container));
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_http_patch_is_visible_to_workers() {
        let (_, container) = container();
        let (status, body) = get(
            &container,
            "/api/v1/patch?chain=0&height=1000&hash=0xabc&limit=300000&pricex=12.5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["poly_hash"], "0xabc");

        let worker_view = Tx {
            src_hash: "0xsrc".into(),
            src_height: 55,
            ..Tx::for_selector(ChainId::POLY, 1000, "0xabc")
        };
        let record = container
            .correction_api()
            .get_patch(&RequestContext::background(), ChainId::POLY, &worker_view)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.dst_gas_limit, Some(300_000));
        assert_eq!(record.dst_gas_price_x.as_deref(), Some("12.5"));
    }

    #[tokio::test]
    async fn test_http_skip_and_cli_check_agree() {
        let (_, container) = container();
        let (status, _) = get(&container, "/api/v1/skip?chain=2&height=55&hash=0xsrc").await;
        assert_eq!(status, StatusCode::OK);

        let command = Command::CheckSkip(TxArgs {
            chain: 2,
            height: 55,
            hash: "0xsrc".into(),
        });
        let out = cli::execute(&container, &command).await.unwrap();
        let tx: Tx = serde_json::from_str(&out).unwrap();
        assert!(tx.skipped);

        let (_, body) = get(&container, "/api/v1/check_skip?chain=2&height=56&hash=0xsrc").await;
        assert_eq!(body["skipped"], false);
    }

    #[tokio::test]
    async fn test_http_errors_are_json_strings() {
        let (store, container) = container();

        let (status, body) = get(&container, "/api/v1/patch?chain=x&hash=0xabc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_str().unwrap().contains("chain"));

        let (status, body) = get(&container, "/api/v1/patch?hash=0xabc&price=cheap").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_str().unwrap().contains("price"));

        assert_eq!(store.write_count(), 0);

        store.set_offline(true);
        let (status, body) = get(&container, "/api/v1/skip?hash=0xabc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_string());
    }

    #[tokio::test]
    async fn test_cli_unskip_reverses_http_skip() {
        let (_, container) = container();
        get(&container, "/api/v1/skip?hash=0xabc&height=1000").await;

        let args = TxArgs {
            chain: 0,
            height: 1000,
            hash: "0xabc".into(),
        };
        cli::execute(&container, &Command::Unskip(args.clone()))
            .await
            .unwrap();

        let skipped = container
            .skip_api()
            .check_skip(
                &RequestContext::background(),
                ChainId::POLY,
                &Tx::for_selector(ChainId::POLY, args.height, args.hash),
            )
            .await
            .unwrap();
        assert!(!skipped);
    }
}
