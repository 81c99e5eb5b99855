//! Indicator trait definitions.

use crate::types::BarSeries;

/// Trait for technical indicators.
///
/// Indicators are pure functions of a bar series: they never mutate their
/// input and return a freshly built output.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given series.
    ///
    /// A series shorter than the warm-up produces empty output, not an error.
    fn calculate(&self, series: &BarSeries) -> Self::Output;

    /// Number of leading bars that produce no value.
    fn warmup_period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Check whether the series is long enough for at least one value.
    fn has_enough_data(&self, series: &BarSeries) -> bool {
        series.len() > self.warmup_period()
    }
}

/// Left-fold accumulator behind a recursively smoothed indicator.
///
/// Each call folds one input value into the accumulator and returns the
/// value emitted for it, or `None` while still warming up.
pub trait StreamingIndicator: Send + Sync {
    /// Fold a new value into the accumulator.
    fn update(&mut self, value: f64) -> Option<f64>;

    /// Get the current value without adding new data.
    fn current(&self) -> Option<f64>;

    /// Reset the accumulator.
    fn reset(&mut self);

    /// Check if the accumulator has produced a value yet.
    fn is_ready(&self) -> bool {
        self.current().is_some()
    }
}
