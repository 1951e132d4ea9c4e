//! # HTTP Front Door
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET /api/v1/patch` | Store gas overrides for a tx |
//! | `GET /api/v1/skip` | Mark a tx skipped |
//! | `GET /api/v1/check_skip` | Read a tx's skip mark |
//! | `GET /metrics` | Prometheus exposition |
//! | `GET /health` | Liveness |
//!
//! Query parameters: `chain, height, hash, price, pricex, limit, free`.
//! Success is `200` with the tx as JSON; any failure is `400` with the error
//! message as a JSON string.

mod error;
mod handlers;

pub use error::ApiError;

use crate::container::ServiceContainer;
use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use pr_01_correction_bus::{CorrectionApi, SkipApi};
use shared_bus::RequestContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Patch records.
    pub corrections: Arc<dyn CorrectionApi>,
    /// Skip marks.
    pub skips: Arc<dyn SkipApi>,
    /// Deadline for each request's store calls.
    pub store_timeout: Duration,
    /// Cancels in-flight store calls at shutdown.
    pub shutdown: Option<watch::Receiver<bool>>,
}

impl AppState {
    /// State over the container's services.
    pub fn from_container(container: &ServiceContainer) -> Self {
        Self {
            corrections: container.correction_api(),
            skips: container.skip_api(),
            store_timeout: container.config.store_timeout(),
            shutdown: None,
        }
    }

    /// Cancel in-flight store calls when `shutdown` flips to `true`.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::with_timeout(self.store_timeout);
        match &self.shutdown {
            Some(rx) => ctx.with_cancel(rx.clone()),
            None => ctx,
        }
    }
}

/// Build the front door router.
pub fn build_router(state: AppState) -> Router {
    if let Err(e) = relayer_telemetry::register_metrics() {
        warn!(error = %e, "[relayer] Metrics registration failed");
    }

    Router::new()
        .route("/api/v1/patch", get(handlers::patch))
        .route("/api/v1/skip", get(handlers::skip))
        .route("/api/v1/check_skip", get(handlers::check_skip))
        .route("/metrics", get(handlers::metrics))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve `state` on `listener` until `shutdown` reads `true`.
///
/// Requests in flight when shutdown fires are allowed to finish; their store
/// calls see the same signal through their request context.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "[relayer] HTTP front door listening");
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .context("HTTP server error")?;

    info!("[relayer] HTTP front door stopped");
    Ok(())
}
