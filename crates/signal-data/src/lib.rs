//! Bar sources for the signal engine.

mod chart;
mod csv_source;
mod raw;

pub use chart::ChartJsonSource;
pub use csv_source::CsvSource;
pub use raw::{build_series, normalize_epoch, parse_timestamp, RawBar};

use signal_core::error::DataError;
use signal_core::traits::BarSource;
use signal_core::types::BarSeries;
use std::path::Path;
use tracing::debug;

/// Pick a source for a file by its extension (`.json` is a chart payload,
/// anything else is read as CSV).
pub fn open_source(
    path: impl AsRef<Path>,
    symbol: Option<&str>,
) -> Result<Box<dyn BarSource>, DataError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let source: Box<dyn BarSource> = match (is_json, symbol) {
        (true, Some(symbol)) => Box::new(ChartJsonSource::new(path)?.with_symbol(symbol)),
        (true, None) => Box::new(ChartJsonSource::new(path)?),
        (false, Some(symbol)) => Box::new(CsvSource::new(path)?.with_symbol(symbol)),
        (false, None) => Box::new(CsvSource::new(path)?),
    };
    debug!(path = %path.display(), source = source.name(), "Opened bar source");
    Ok(source)
}

/// Load a series from a CSV or chart JSON file.
pub async fn load_series(
    path: impl AsRef<Path>,
    symbol: Option<&str>,
) -> Result<BarSeries, DataError> {
    open_source(path, symbol)?.load().await
}
