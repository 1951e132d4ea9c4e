//! # Poly Relayer Runtime
//!
//! The operator-facing process of the relayer control plane.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and service wiring over the shared store
//! - `adapters/` - Port implementations (Prometheus metrics sink)
//! - `http/` - Front door routes over the correction bus
//! - `cli` - One-off operator commands
//! - `runtime` - Long-lived sampler and HTTP tasks
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging, optional OTLP, Prometheus registry)
//! 2. Load configuration (defaults, file, environment, CLI flags)
//! 3. Connect the shared store and wire the services
//! 4. Spawn the health sampler and the HTTP front door
//! 5. Wait for Ctrl+C, then stop both

pub mod adapters;
pub mod cli;
pub mod container;
pub mod http;
pub mod request;
pub mod runtime;

pub use cli::{Cli, Command};
pub use container::{RelayerConfig, ServiceContainer};
pub use runtime::RelayerRuntime;
