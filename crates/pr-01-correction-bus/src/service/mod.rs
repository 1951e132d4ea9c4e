//! # Service Module
//!
//! Store-backed implementations of the inbound ports.

mod correction_store;
mod skip_gate;

pub use correction_store::CorrectionStore;
pub use skip_gate::SkipGate;
