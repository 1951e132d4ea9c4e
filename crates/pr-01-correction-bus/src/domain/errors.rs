//! # Domain Errors
//!
//! Failures surfaced to the operator. Absence of a record is not an error;
//! it is an `Ok(None)` / `Ok(false)` result.

use shared_bus::StoreError;
use shared_types::ValidationError;
use thiserror::Error;

/// Correction bus error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The shared store failed, timed out or the request was cancelled.
    /// Never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Rejected before any store call.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl BusError {
    /// Whether the caller sent malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BusError::InvalidInput(_))
    }
}
