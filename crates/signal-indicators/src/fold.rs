//! Drive streaming accumulators over timestamped values.

use signal_core::traits::StreamingIndicator;
use signal_core::types::{BarSeries, IndicatorPoint, IndicatorSeries};

/// Fold `values` through `state`, keeping a point wherever the accumulator emits.
///
/// `start` is the bar index the first emitted point belongs to.
pub fn fold_points<S, I>(mut state: S, start: usize, values: I) -> IndicatorSeries
where
    S: StreamingIndicator,
    I: IntoIterator<Item = (i64, f64)>,
{
    let points = values
        .into_iter()
        .filter_map(|(time, value)| state.update(value).map(|v| IndicatorPoint::new(time, v)))
        .collect();
    IndicatorSeries::new(start, points)
}

/// Fold the closes of `series` through `state`.
pub fn fold_closes<S: StreamingIndicator>(state: S, series: &BarSeries, start: usize) -> IndicatorSeries {
    fold_points(state, start, series.iter().map(|bar| (bar.time, bar.close)))
}
