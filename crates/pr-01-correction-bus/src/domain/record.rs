//! # Patch Record
//!
//! The destination-side overrides stored for one identity. A record is
//! replaced wholesale on every patch; fields omitted in the new request are
//! cleared, not inherited.

use serde::{Deserialize, Serialize};
use shared_types::{Tx, ValidationError};

/// Operator overrides applied by relay workers before processing a tx.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchRecord {
    /// Legacy destination gas price, decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_price: Option<String>,
    /// EIP-1559 style destination gas price, decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_price_x: Option<String>,
    /// Destination gas limit. Zero means no override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_gas_limit: Option<u64>,
    /// Bypass the fee sufficiency check.
    pub skip_check_fee: bool,
}

impl PatchRecord {
    /// Extract and normalize the override fields carried by `tx`.
    ///
    /// Empty strings and a zero gas limit collapse to `None`.
    pub fn from_tx(tx: &Tx) -> Result<Self, ValidationError> {
        let record = Self {
            dst_gas_price: normalize(tx.dst_gas_price.as_deref()),
            dst_gas_price_x: normalize(tx.dst_gas_price_x.as_deref()),
            dst_gas_limit: tx.dst_gas_limit.filter(|limit| *limit > 0),
            skip_check_fee: tx.skip_check_fee,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check gas price overrides are non-negative decimals.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_gas_price("price", self.dst_gas_price.as_deref())?;
        check_gas_price("pricex", self.dst_gas_price_x.as_deref())?;
        Ok(())
    }

    /// Whether the record carries no override at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite the override fields of `tx` with this record.
    pub fn apply_to(&self, tx: &mut Tx) {
        tx.dst_gas_price = self.dst_gas_price.clone();
        tx.dst_gas_price_x = self.dst_gas_price_x.clone();
        tx.dst_gas_limit = self.dst_gas_limit;
        tx.skip_check_fee = self.skip_check_fee;
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_gas_price(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !is_decimal(v) => Err(ValidationError::InvalidGasPrice {
            field,
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}

/// `digits[.digits]`
fn is_decimal(value: &str) -> bool {
    let mut parts = value.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match parts.next() {
        Some(frac) => all_digits(whole) && all_digits(frac),
        None => all_digits(whole),
    }
}
