//! # Adapters Module
//!
//! Shared-store implementations of the read ports, and an in-process sink.

mod recording_sink;
mod store_source;

pub use recording_sink::RecordingSink;
pub use store_source::{StoreHeightSource, StoreQueueDepth};
