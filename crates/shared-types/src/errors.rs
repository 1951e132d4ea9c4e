//! # Error Types
//!
//! Input validation errors shared across subsystems. These are raised before
//! any store call is made.

use thiserror::Error;

/// Malformed identity or override fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The hash selected by the chain selector is empty.
    #[error("Empty tx hash for {coordinate} identity at height {height}")]
    EmptyHash { coordinate: String, height: u64 },

    /// A numeric field could not be parsed.
    #[error("Invalid {field}: {value:?} is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    /// A gas price override is not a non-negative decimal.
    #[error("Invalid {field}: {value:?} is not a non-negative decimal")]
    InvalidGasPrice { field: &'static str, value: String },
}
