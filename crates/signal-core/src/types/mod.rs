//! Core data types for the signal engine.

mod bar;
mod marker;
mod series;

pub use bar::{Bar, BarSeries};
pub use marker::{Direction, Marker, MarkerPosition};
pub use series::{IndicatorPoint, IndicatorSeries, TimeIndex};
