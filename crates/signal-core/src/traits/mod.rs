//! Core traits for the signal engine.

mod data_source;
mod generator;
mod indicator;

pub use data_source::BarSource;
pub use generator::{GeneratorConfig, MarkerGenerator};
pub use indicator::{Indicator, StreamingIndicator};
