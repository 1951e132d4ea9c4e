//! # Relayer Benchmarks
//!
//! Criterion routines per subsystem, driven from `benches/`.

pub mod pr_01_identity;
pub mod pr_02_sampler;
