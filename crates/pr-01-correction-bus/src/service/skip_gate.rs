//! # Skip Gate
//!
//! Boolean skip marks consulted by relay workers before every processing
//! attempt. Skipping is idempotent and sticky; only `unskip` clears a mark.

use crate::domain::BusError;
use crate::ports::SkipApi;
use async_trait::async_trait;
use shared_bus::{get_json, keys, set_json, RequestContext, SharedStore};
use shared_types::{ChainId, Tx, TxIdentity};
use std::sync::Arc;
use tracing::{debug, info};

/// Skip gate service.
pub struct SkipGate {
    store: Arc<dyn SharedStore>,
}

impl SkipGate {
    /// Create a skip gate over `store`.
    pub fn new(store: Arc<dyn SharedStore>) -> Self {
        Self { store }
    }

    /// Write the skip state for an already resolved identity.
    pub async fn set_state(
        &self,
        ctx: &RequestContext,
        identity: &TxIdentity,
        skipped: bool,
    ) -> Result<(), BusError> {
        identity.validate()?;
        let key = keys::skip_key(identity);
        ctx.run(set_json(self.store.as_ref(), &key, &skipped)).await?;
        Ok(())
    }

    /// Read the skip state for an already resolved identity. Absent is `false`.
    pub async fn is_skipped(
        &self,
        ctx: &RequestContext,
        identity: &TxIdentity,
    ) -> Result<bool, BusError> {
        identity.validate()?;
        let key = keys::skip_key(identity);
        let state: Option<bool> = ctx.run(get_json(self.store.as_ref(), &key)).await?;
        Ok(state.unwrap_or(false))
    }
}

#[async_trait]
impl SkipApi for SkipGate {
    async fn skip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError> {
        let identity = TxIdentity::resolve(selector, tx);
        identity.validate()?;
        info!(
            request_id = %ctx.request_id(),
            chain = %selector,
            identity = %identity,
            "[pr-01] Skipping tx"
        );
        self.set_state(ctx, &identity, true).await?;
        Ok(identity)
    }

    async fn unskip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError> {
        let identity = TxIdentity::resolve(selector, tx);
        identity.validate()?;
        info!(
            request_id = %ctx.request_id(),
            chain = %selector,
            identity = %identity,
            "[pr-01] Clearing skip mark"
        );
        self.set_state(ctx, &identity, false).await?;
        Ok(identity)
    }

    async fn check_skip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<bool, BusError> {
        let identity = TxIdentity::resolve(selector, tx);
        let skipped = self.is_skipped(ctx, &identity).await?;
        debug!(identity = %identity, skipped, "[pr-01] Skip check");
        Ok(skipped)
    }
}
