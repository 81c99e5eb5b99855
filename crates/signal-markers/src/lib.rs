//! Marker generators.
//!
//! This crate turns indicator output into sparse BUY/SELL chart markers:
//! - Confirmed crossover (EMA cross + RSI neutral band + MACD histogram momentum)
//! - Plain fast/slow EMA crossover
//!
//! Generators are registered by name in [`GeneratorRegistry`].

mod confirmed;
mod crossover;
mod registry;

pub use confirmed::{Reading, SignalConfig, SignalGenerator};
pub use crossover::{CrossoverConfig, CrossoverGenerator};
pub use registry::{GeneratorInfo, GeneratorRegistry};
