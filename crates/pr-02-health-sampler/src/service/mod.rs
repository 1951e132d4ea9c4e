//! # Service Module

mod sampler;

pub use sampler::{HealthSampler, DEFAULT_READ_TIMEOUT, SAMPLE_INTERVAL};
