//! # Domain Errors

use shared_bus::StoreError;
use thiserror::Error;

/// A single metric read failed. Never escapes a tick.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// Backing store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored height is not decimal u64 text.
    #[error("Malformed height at {key}: {value:?}")]
    MalformedHeight {
        /// Store key read.
        key: String,
        /// Raw stored text.
        value: String,
    },
}
