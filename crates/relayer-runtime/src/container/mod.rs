//! # Service Container
//!
//! Configuration and the wired-up services shared by the HTTP front door,
//! the CLI and the health sampler task.

pub mod config;
pub mod services;

pub use config::{ConfigError, HttpConfig, RelayerConfig, StoreBackend, StoreConfig};
pub use services::ServiceContainer;
