//! # Domain Module
//!
//! Metric naming, lag derivation and tick snapshots.

pub mod errors;
pub mod metrics;
pub mod snapshot;

pub use errors::*;
pub use metrics::*;
pub use snapshot::*;
