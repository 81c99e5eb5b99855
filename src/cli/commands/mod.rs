//! CLI command implementations.

pub mod analyze;
pub mod generators;
pub mod validate;
