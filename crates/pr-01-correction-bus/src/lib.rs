//! # PR-01 Correction Bus
//!
//! Out-of-band operator corrections for cross-chain transactions.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Domain + Ports + Service)
//!
//! ## Purpose
//!
//! Relay workers forward transactions automatically. When one is stuck or
//! mis-priced, an operator can:
//! - **Patch** it: store destination-side overrides (gas price, gas limit,
//!   fee check bypass) that workers read before processing the tx.
//! - **Skip** it: permanently stop automatic relay attempts.
//!
//! ## Guarantees
//!
//! | Guarantee | How |
//! |-----------|-----|
//! | One live record per identity | Full-record overwrite, no merge, no history |
//! | Skip is sticky | Only an explicit `unskip` reverses it |
//! | Checks never write | `check_skip` / `get` are pure reads |
//! | Bad input never reaches the store | Validation runs before any store call |
//!
//! ## Module Structure
//!
//! ```text
//! pr-01-correction-bus/
//! ├── domain/          # PatchRecord, BusError
//! ├── ports/           # CorrectionApi, SkipApi
//! └── service/         # CorrectionStore, SkipGate
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{BusError, PatchRecord};
pub use ports::{CorrectionApi, SkipApi};
pub use service::{CorrectionStore, SkipGate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
