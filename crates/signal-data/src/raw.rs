//! Raw record normalization.
//!
//! Everything read from outside the engine passes through here: records with
//! missing or non-finite fields are dropped, timestamps are normalized to
//! epoch seconds, and the survivors are handed to [`BarSeries::new`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use signal_core::error::DataError;
use signal_core::types::{Bar, BarSeries};
use tracing::debug;

/// Epoch values above this are taken to be milliseconds.
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// A bar record as read from a source; any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawBar {
    pub time: Option<i64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl RawBar {
    /// Convert into a bar if every field is present and finite.
    pub fn into_bar(self) -> Option<Bar> {
        let bar = Bar::new(self.time?, self.open?, self.high?, self.low?, self.close?);
        bar.is_finite().then_some(bar)
    }
}

/// Filter raw records and build a validated series.
///
/// Malformed records are dropped silently (logged at debug). Ordering is
/// not repaired: out-of-order timestamps are a [`DataError::Series`].
pub fn build_series<I>(records: I, symbol: Option<&str>) -> Result<BarSeries, DataError>
where
    I: IntoIterator<Item = RawBar>,
{
    let mut total = 0usize;
    let bars: Vec<Bar> = records
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(RawBar::into_bar)
        .collect();

    let dropped = total - bars.len();
    if dropped > 0 {
        debug!(dropped, kept = bars.len(), "Dropped malformed bar records");
    }

    let series = BarSeries::new(bars)?;
    Ok(match symbol {
        Some(symbol) => series.with_symbol(symbol),
        None => series,
    })
}

/// Parse a timestamp string into epoch seconds.
///
/// Accepts RFC 3339, a handful of common date/datetime layouts (as UTC), and
/// bare epoch numbers in seconds or milliseconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }

    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M"];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp());
        }
    }

    value.parse::<i64>().ok().map(normalize_epoch)
}

/// Normalize an epoch value that may be in milliseconds to seconds.
pub fn normalize_epoch(value: i64) -> i64 {
    if value > MILLIS_THRESHOLD {
        value / 1000
    } else {
        value
    }
}
