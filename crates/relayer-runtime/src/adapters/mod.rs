//! # Adapters
//!
//! Runtime implementations of subsystem ports.

mod prometheus_sink;

pub use prometheus_sink::PrometheusSink;
