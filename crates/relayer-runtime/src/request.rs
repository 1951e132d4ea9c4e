//! # Operator Requests
//!
//! The `(chain, height, hash)` triple plus optional overrides that both the
//! HTTP front door and the CLI accept, and the sparse [`Tx`] built from it.

use serde::Deserialize;
use shared_types::{ChainId, Tx, ValidationError};

/// A parsed operator request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperatorRequest {
    /// Chain selector; `0` addresses the tx by its poly coordinates.
    pub chain: ChainId,
    /// Height in the selected coordinate system.
    pub height: u64,
    /// Hash in the selected coordinate system.
    pub hash: String,
    /// Legacy gas price override.
    pub price: Option<String>,
    /// EIP-1559 style gas price override.
    pub price_x: Option<String>,
    /// Gas limit override.
    pub limit: Option<u64>,
    /// Bypass the fee check.
    pub free: bool,
}

impl OperatorRequest {
    /// The sparse tx this request describes.
    pub fn to_tx(&self) -> Tx {
        Tx {
            dst_gas_price: self.price.clone(),
            dst_gas_price_x: self.price_x.clone(),
            dst_gas_limit: self.limit,
            skip_check_fee: self.free,
            ..Tx::for_selector(self.chain, self.height, self.hash.clone())
        }
    }
}

/// Raw query string of `/api/v1/*`. Everything is text so malformed numbers
/// surface as [`ValidationError`] instead of an extractor rejection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TxQuery {
    pub chain: Option<String>,
    pub height: Option<String>,
    pub hash: Option<String>,
    pub price: Option<String>,
    pub pricex: Option<String>,
    pub limit: Option<String>,
    pub free: Option<String>,
}

impl TxQuery {
    /// Parse into a request. Absent `chain`/`height` mean 0.
    pub fn parse(self) -> Result<OperatorRequest, ValidationError> {
        Ok(OperatorRequest {
            chain: ChainId(parse_u64("chain", self.chain.as_deref())?.unwrap_or(0)),
            height: parse_u64("height", self.height.as_deref())?.unwrap_or(0),
            hash: self.hash.unwrap_or_default().trim().to_string(),
            price: self.price,
            price_x: self.pricex,
            limit: parse_u64("limit", self.limit.as_deref())?,
            free: self.free.as_deref() == Some("true"),
        })
    }
}

fn parse_u64(field: &'static str, raw: Option<&str>) -> Result<Option<u64>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidNumber {
                field,
                value: text.to_string(),
            }),
    }
}
