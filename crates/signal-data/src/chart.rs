//! Chart JSON bar source.
//!
//! Reads the payload shape returned by chart quote APIs:
//! `{ "meta": { "symbol": .. }, "quotes": [ { "date", "open", "high", "low", "close" } ] }`.
//! Price fields only count when they are JSON numbers; strings and nulls
//! drop the quote.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use signal_core::error::DataError;
use signal_core::traits::BarSource;
use signal_core::types::BarSeries;
use std::path::{Path, PathBuf};

use crate::raw::{build_series, normalize_epoch, parse_timestamp, RawBar};

#[derive(Debug, Deserialize)]
struct ChartPayload {
    #[serde(default)]
    meta: Option<ChartMeta>,
    quotes: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    date: Value,
    #[serde(default)]
    open: Value,
    #[serde(default)]
    high: Value,
    #[serde(default)]
    low: Value,
    #[serde(default)]
    close: Value,
}

impl From<ChartQuote> for RawBar {
    fn from(quote: ChartQuote) -> Self {
        let time = match &quote.date {
            Value::String(s) => parse_timestamp(s),
            Value::Number(n) => n.as_i64().map(normalize_epoch),
            _ => None,
        };
        RawBar {
            time,
            open: quote.open.as_f64(),
            high: quote.high.as_f64(),
            low: quote.low.as_f64(),
            close: quote.close.as_f64(),
        }
    }
}

/// JSON file holding a chart payload.
pub struct ChartJsonSource {
    path: PathBuf,
    symbol: Option<String>,
}

impl ChartJsonSource {
    /// Create a new chart source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            symbol: None,
        })
    }

    /// Override the symbol from the payload metadata.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Parse a chart payload into a series.
    ///
    /// `symbol` wins over `meta.symbol` when both are present.
    pub fn parse(data: &[u8], symbol: Option<&str>) -> Result<BarSeries, DataError> {
        let payload: ChartPayload =
            serde_json::from_slice(data).map_err(|e| DataError::ParseError(e.to_string()))?;

        let meta_symbol = payload.meta.and_then(|m| m.symbol);
        let symbol = symbol.or(meta_symbol.as_deref());

        build_series(payload.quotes.into_iter().map(RawBar::from), symbol)
    }
}

#[async_trait]
impl BarSource for ChartJsonSource {
    async fn load(&self) -> Result<BarSeries, DataError> {
        let data = tokio::fs::read(&self.path).await?;
        Self::parse(&data, self.symbol.as_deref())
    }

    fn name(&self) -> &str {
        "chart-json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> Value {
        json!({
            "meta": { "symbol": "TATASTEEL.NS", "currency": "INR" },
            "quotes": [
                { "date": "2024-01-15T03:45:00.000Z", "open": 130.1, "high": 131.0, "low": 129.8, "close": 130.6, "volume": 1000 },
                { "date": "2024-01-15T04:45:00.000Z", "open": null, "high": null, "low": null, "close": null, "volume": 0 },
                { "date": "2024-01-15T05:45:00.000Z", "open": 130.6, "high": 131.2, "low": "130.0", "close": 131.1 },
                { "date": 1705300500000i64, "open": 131.1, "high": 131.9, "low": 130.9, "close": 131.5 }
            ]
        })
    }

    #[test]
    fn test_parse_filters_non_numeric_quotes() {
        let data = serde_json::to_vec(&sample()).unwrap();
        let series = ChartJsonSource::parse(&data, None).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.symbol(), Some("TATASTEEL.NS"));
        assert_eq!(series.first().unwrap().time, 1_705_290_300);
        assert_eq!(series.last().unwrap().time, 1_705_300_500);
        assert_eq!(series.closes(), vec![130.6, 131.5]);
    }

    #[test]
    fn test_explicit_symbol_overrides_meta() {
        let data = serde_json::to_vec(&sample()).unwrap();
        let series = ChartJsonSource::parse(&data, Some("TATA")).unwrap();

        assert_eq!(series.symbol(), Some("TATA"));
    }

    #[test]
    fn test_parse_requires_quotes() {
        let err = ChartJsonSource::parse(br#"{ "meta": {} }"#, None).unwrap_err();
        assert!(matches!(err, DataError::ParseError(_)));
    }

    #[test]
    fn test_empty_quotes_give_empty_series() {
        let series = ChartJsonSource::parse(br#"{ "quotes": [] }"#, None).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.symbol(), None);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(&serde_json::to_vec(&sample()).unwrap())
            .unwrap();

        let source = ChartJsonSource::new(file.path()).unwrap();
        let series = source.load().await.unwrap();

        assert_eq!(source.name(), "chart-json");
        assert_eq!(series.len(), 2);
    }
}
