//! # Inbound Ports
//!
//! API traits defining what an operator can do to a transaction.

use crate::domain::{BusError, PatchRecord};
use async_trait::async_trait;
use shared_bus::RequestContext;
use shared_types::{ChainId, Tx, TxIdentity};

/// Correction API - inbound port.
#[async_trait]
pub trait CorrectionApi: Send + Sync {
    /// Store the overrides carried by `tx` under the identity `selector`
    /// resolves to, replacing any earlier record.
    async fn patch(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError>;

    /// Latest record for the identity `selector` resolves to.
    async fn get_patch(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<Option<PatchRecord>, BusError>;
}

/// Skip API - inbound port.
#[async_trait]
pub trait SkipApi: Send + Sync {
    /// Mark the tx as skipped. Idempotent.
    async fn skip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError>;

    /// Clear a skip mark. The only way to reverse [`SkipApi::skip`].
    async fn unskip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<TxIdentity, BusError>;

    /// Whether the tx is marked skipped. Never writes.
    async fn check_skip(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        tx: &Tx,
    ) -> Result<bool, BusError>;

    /// `tx` with its `skipped` flag filled in from the store.
    async fn check(
        &self,
        ctx: &RequestContext,
        selector: ChainId,
        mut tx: Tx,
    ) -> Result<Tx, BusError> {
        tx.skipped = self.check_skip(ctx, selector, &tx).await?;
        Ok(tx)
    }
}
