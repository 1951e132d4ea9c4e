//! # Ports Module
//!
//! Outbound contracts the sampler reads from and writes to.

pub mod outbound;

pub use outbound::*;
