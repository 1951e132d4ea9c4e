//! # Shared Types Crate
//!
//! Types shared by every crate of the relayer control plane.
//!
//! ## Design Principles
//!
//! - **One identity per call**: a transaction is addressed either in poly-chain
//!   coordinates or in source-chain coordinates. The caller's chain selector
//!   decides which; the two are never merged or cross-checked.
//! - **Sparse transactions**: a [`Tx`] only carries the fields the caller knows.
//!   Everything except the identity pair is optional.

pub mod entities;
pub mod errors;
pub mod identity;

pub use entities::*;
pub use errors::*;
pub use identity::{Coordinate, TxIdentity};
