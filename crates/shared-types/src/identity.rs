//! # Tx Identity
//!
//! A transaction can be named in two coordinate systems: the source chain it
//! originated on, or the poly chain it was relayed through. Every correction
//! and skip record is addressed by exactly one of them, picked by the caller's
//! chain selector.

use crate::entities::{ChainId, Tx};
use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which coordinate system an identity lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinate {
    /// (poly height, poly hash)
    Poly,
    /// (source height, source hash)
    Source,
}

impl Coordinate {
    /// Short tag used in store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Coordinate::Poly => "poly",
            Coordinate::Source => "src",
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived store key for a transaction. Never stored as a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxIdentity {
    /// Coordinate system the pair below belongs to.
    pub coordinate: Coordinate,
    /// Block height in that coordinate system.
    pub height: u64,
    /// Transaction hash in that coordinate system.
    pub hash: String,
}

impl TxIdentity {
    /// Resolve the identity of `tx` under `selector`.
    ///
    /// Selector `0` always picks `(poly_height, poly_hash)`, whatever source
    /// fields are populated; any other selector picks `(src_height, src_hash)`.
    pub fn resolve(selector: ChainId, tx: &Tx) -> Self {
        if selector.is_poly() {
            Self {
                coordinate: Coordinate::Poly,
                height: tx.poly_height,
                hash: tx.poly_hash.clone(),
            }
        } else {
            Self {
                coordinate: Coordinate::Source,
                height: tx.src_height,
                hash: tx.src_hash.clone(),
            }
        }
    }

    /// Reject degenerate identities. Height 0 is allowed, an empty hash is not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.hash.trim().is_empty() {
            return Err(ValidationError::EmptyHash {
                coordinate: self.coordinate.to_string(),
                height: self.height,
            });
        }
        Ok(())
    }

    /// `{coordinate}:{height}:{hash}`, appended to a namespace by the store layer.
    pub fn key_suffix(&self) -> String {
        format!("{}:{}:{}", self.coordinate, self.height, self.hash)
    }
}

impl fmt::Display for TxIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.coordinate, self.height, self.hash)
    }
}
