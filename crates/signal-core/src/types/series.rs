//! Indicator output series.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single indicator reading at a bar timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    /// Timestamp of the bar the value belongs to (seconds)
    pub time: i64,
    /// Indicator value
    pub value: f64,
}

impl IndicatorPoint {
    /// Create a new point.
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Ordered indicator output, time-aligned to a suffix of its bar series.
///
/// `start` is the index in the originating bar series of the first point,
/// which is also the number of warm-up bars that produced no value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    start: usize,
    points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Create a series whose first point belongs to bar `start`.
    pub fn new(start: usize, points: Vec<IndicatorPoint>) -> Self {
        Self { start, points }
    }

    /// Bar index of the first point.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get all points as a slice.
    pub fn points(&self) -> &[IndicatorPoint] {
        &self.points
    }

    /// Get a point by position within this series.
    pub fn get(&self, index: usize) -> Option<&IndicatorPoint> {
        self.points.get(index)
    }

    /// Get the last point.
    pub fn last(&self) -> Option<&IndicatorPoint> {
        self.points.last()
    }

    /// Extract the values as a vector.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Get an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &IndicatorPoint> {
        self.points.iter()
    }

    /// Build a timestamp-keyed lookup over this series.
    pub fn time_index(&self) -> TimeIndex {
        TimeIndex::from(self)
    }
}

/// Timestamp-keyed lookup into an indicator series.
///
/// Series warm up over different lengths, so joins between them go through
/// the bar timestamp rather than a position.
#[derive(Debug, Clone, Default)]
pub struct TimeIndex {
    values: HashMap<i64, f64>,
}

impl TimeIndex {
    /// Value recorded at `time`, if the series has one.
    #[inline]
    pub fn get(&self, time: i64) -> Option<f64> {
        self.values.get(&time).copied()
    }

    /// Number of indexed timestamps.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&IndicatorSeries> for TimeIndex {
    fn from(series: &IndicatorSeries) -> Self {
        Self {
            values: series.iter().map(|p| (p.time, p.value)).collect(),
        }
    }
}
