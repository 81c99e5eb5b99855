//! Core types and traits for the indicator and signal engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries)
//! - Indicator output types (IndicatorPoint, IndicatorSeries, TimeIndex)
//! - Chart markers emitted by signal generators
//! - Core traits for indicators, marker generators, and bar sources

pub mod error;
pub mod traits;
pub mod types;

pub use error::{SignalError, SignalResult};
pub use traits::*;
pub use types::*;
