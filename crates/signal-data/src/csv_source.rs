//! CSV bar source.

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::BarSource;
use signal_core::types::BarSeries;
use std::path::{Path, PathBuf};

use crate::raw::{build_series, parse_timestamp, RawBar};

/// CSV record format.
///
/// Unparseable numeric cells become `None` and the row is dropped later.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "timestamp",
        alias = "Timestamp",
        alias = "time",
        alias = "Time"
    )]
    date: String,
    #[serde(alias = "Open", deserialize_with = "csv::invalid_option", default)]
    open: Option<f64>,
    #[serde(alias = "High", deserialize_with = "csv::invalid_option", default)]
    high: Option<f64>,
    #[serde(alias = "Low", deserialize_with = "csv::invalid_option", default)]
    low: Option<f64>,
    #[serde(
        alias = "Close",
        alias = "Adj Close",
        deserialize_with = "csv::invalid_option",
        default
    )]
    close: Option<f64>,
}

impl From<CsvRecord> for RawBar {
    fn from(record: CsvRecord) -> Self {
        RawBar {
            time: parse_timestamp(&record.date),
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        }
    }
}

/// CSV file with a header row and date/open/high/low/close columns.
pub struct CsvSource {
    path: PathBuf,
    symbol: Option<String>,
}

impl CsvSource {
    /// Create a new CSV source.
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

    /// Tag loaded series with a symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Parse CSV text into a series.
    pub fn parse(data: &[u8], symbol: Option<&str>) -> Result<BarSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        for result in reader.deserialize::<CsvRecord>() {
            let record = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            records.push(RawBar::from(record));
        }

        build_series(records, symbol)
    }
}

#[async_trait]
impl BarSource for CsvSource {
    async fn load(&self) -> Result<BarSeries, DataError> {
        let data = tokio::fs::read(&self.path).await?;
        Self::parse(&data, self.symbol.as_deref())
    }

    fn name(&self) -> &str {
        "csv"
    }
}
