//! # Shared Bus - Correction Bus Store Contract
//!
//! The relayer's control plane and its relay workers share one external
//! key-value store. This crate defines the contract both sides code against.
//!
//! ## Architecture Rules
//!
//! - **The store is the only synchronization primitive.** Application code
//!   takes no locks across store calls; every write is a single-key, full-state
//!   overwrite and concurrent writers race under last-write-wins.
//! - **One key per identity.** Patch and skip records are keyed by
//!   [`shared_types::TxIdentity`] via [`keys`].
//! - **Caller-scoped deadlines.** Operator calls run inside a
//!   [`RequestContext`]; when it fires the pending store call is dropped.
//!
//! ```text
//! ┌──────────────┐   set / get    ┌──────────────┐   get / len   ┌──────────────┐
//! │ Operator API │ ─────────────→ │ Shared Store │ ←──────────── │ Relay worker │
//! └──────────────┘                └──────────────┘               └──────────────┘
//!                                        ↑ len / get
//!                                 ┌──────────────┐
//!                                 │Health sampler│
//!                                 └──────────────┘
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod context;
pub mod keys;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod store;

// Re-export main types
pub use context::RequestContext;
pub use memory::InMemorySharedStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisSharedStore;
pub use store::{get_json, set_json, SharedStore, StoreError};

/// Default deadline for operator-facing store calls.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
