//! # Domain Module
//!
//! Correction records and bus errors.

pub mod errors;
pub mod record;

pub use errors::*;
pub use record::*;
