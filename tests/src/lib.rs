//! # Poly Relayer Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion routines per subsystem
//! │   ├── pr_01_identity.rs
//! │   └── pr_02_sampler.rs
//! │
//! └── integration/      # Cross-crate flows over the in-memory store
//!     ├── correction_flows.rs
//!     ├── health_flows.rs
//!     └── front_door.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p relayer-tests
//!
//! # By category
//! cargo test -p relayer-tests integration::correction_flows
//! cargo test -p relayer-tests integration::health_flows
//!
//! # Benchmarks
//! cargo bench -p relayer-tests
//! ```

pub mod benchmarks;
