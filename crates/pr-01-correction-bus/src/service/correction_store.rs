//! # Correction Store
//!
//! Last-write-wins patch records over the shared store. One record per
//! identity; a new patch replaces the old one with no merge and no history.

use crate::domain::{BusError, PatchRecord};
use crate::ports::CorrectionApi;
use async_trait::async_trait;
use shared_bus::{get_json, keys, set_json, RequestContext, SharedStore};
use shared_types::{ChainId, Tx, TxIdentity};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Correction store service.
pub struct CorrectionStore {
    store: Arc<dyn SharedStore>,
}

impl CorrectionStore {
    /// Create a correction store over `store`.
    pub fn new(store: Arc<dyn SharedStore>) -> Self {
        Self { store }
    }

    /// Overwrite the record for an already resolved identity.
    pub async fn put(
        &self,
        ctx: &RequestContext,
        identity: &TxIdentity,
        record: &PatchRecord,
    ) -> Result<(), BusError> {
        identity.validate()?;
        record.validate()?;
        let key = keys::patch_key(identity);
        ctx.run(set_json(self.store.as_ref(), &key, record))
            .await
            .map_err(|e| {
                warn!(
                    request_id = %ctx.request_id(),
                    identity = %identity,
                    error = %e,
                    "[pr-01] Patch write failed"
                );
                BusError::from(e)
            })
    }

    /// Read the record for an already resolved identity.
    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        identity: &TxIdentity,
    ) -> Result<Option<PatchRecord>, BusError> {
        identity.validate()?;
        let key = keys::patch_key(identity);
        let record = ctx.run(get_json(self.store.as_ref(), &key)).await?;
        debug!(identity = %identity, found = record.is_some(), "[pr-01] Patch lookup");
        Ok(record)
    }
}

#[async_trait]
impl CorrectionApi for CorrectionStore {
    async fn patch(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError> {
        let identity = TxIdentity::resolve(selector, tx);
        identity.validate()?;
        let record = PatchRecord::from_tx(tx)?;

        info!(
            request_id = %ctx.request_id(),
            chain = %selector,
            identity = %identity,
            body = %tx.encode(),
            "[pr-01] Patching tx"
        );
        self.put(ctx, &identity, &record).await?;
        Ok(identity)
    }

    async fn get_patch(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<Option<PatchRecord>, BusError> {
        self.fetch(ctx, &TxIdentity::resolve(selector, tx)).await
    }
}
