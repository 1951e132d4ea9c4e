//! # Ports Module
//!
//! Inbound API traits for the correction bus. The outbound port is
//! [`shared_bus::SharedStore`].

pub mod inbound;

pub use inbound::*;
