//! # Relayer Runtime
//!
//! Owns the long-lived tasks of `poly-relayer serve`:
//!
//! ```text
//!                     ┌──→ HealthSampler::run ──→ PrometheusSink
//! shutdown (watch) ───┤
//!                     └──→ HTTP front door (/api/v1/*, /metrics, /health)
//! ```
//!
//! Both tasks observe the same shutdown channel. The sampler finishes its
//! current tick; the HTTP server drains in-flight requests.

use crate::adapters::PrometheusSink;
use crate::container::ServiceContainer;
use crate::http::{self, AppState};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Running relayer control plane.
pub struct RelayerRuntime {
    container: Arc<ServiceContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RelayerRuntime {
    /// Runtime over wired services; nothing runs until [`Self::start`].
    pub fn new(container: ServiceContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Bind the front door and spawn the sampler. Returns the bound address.
    pub async fn start(&self) -> Result<SocketAddr> {
        let addr = self.container.config.http_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        let local_addr = listener.local_addr().context("Listener has no local address")?;

        let sampler = self
            .container
            .health_sampler(Arc::new(PrometheusSink::new()));
        let sampler_shutdown = self.shutdown_rx.clone();
        let sampler_task = tokio::spawn(async move {
            sampler.run(sampler_shutdown).await;
        });

        let state = AppState::from_container(&self.container).with_shutdown(self.shutdown_rx.clone());
        let http_shutdown = self.shutdown_rx.clone();
        let http_task = tokio::spawn(async move {
            if let Err(e) = http::serve(listener, state, http_shutdown).await {
                error!("[relayer] HTTP front door failed: {:#}", e);
            }
        });

        self.tasks.lock().await.extend([sampler_task, http_task]);
        info!(
            "[relayer] Runtime started on {} ({} chains)",
            local_addr,
            self.container.config.chains.len()
        );
        Ok(local_addr)
    }

    /// Signal shutdown and wait for every task to stop.
    pub async fn shutdown(&self) {
        info!("[relayer] Shutting down");
        let _ = self.shutdown_tx.send(true);

        let tasks: Vec<_> = self.tasks.lock().await.drain(..).collect();
        for task in tasks {
            if let Err(e) = task.await {
                warn!("[relayer] Task ended abnormally: {}", e);
            }
        }
        info!("[relayer] Shutdown complete");
    }
}
