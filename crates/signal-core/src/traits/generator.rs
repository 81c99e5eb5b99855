//! Marker generator trait definitions.

use crate::error::GeneratorError;
use crate::types::{BarSeries, Marker};

/// Configuration trait for marker generators.
pub trait GeneratorConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), GeneratorError>;
}

/// Core marker generator trait.
///
/// A generator reads a whole bar series and returns its markers in
/// chronological order. It keeps no state between calls.
pub trait MarkerGenerator: Send + Sync {
    /// Get the unique name of this generator.
    fn name(&self) -> &str;

    /// Produce the markers for a series.
    ///
    /// A series shorter than the warm-up period yields no markers.
    fn generate(&self, series: &BarSeries) -> Vec<Marker>;

    /// Get the warmup period (number of bars needed before markers can fire).
    fn warmup_period(&self) -> usize;

    /// Check if enough bars are available.
    fn is_warmed_up(&self, bars_available: usize) -> bool {
        bars_available >= self.warmup_period()
    }

    /// Get a description of the generator.
    fn description(&self) -> &str {
        ""
    }
}
