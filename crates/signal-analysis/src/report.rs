//! Analysis report generation.

use chrono::DateTime;
use serde::Serialize;
use signal_core::types::Marker;

use crate::engine::{AnalysisConfig, IndicatorSet};
use crate::statistics::AnalysisStats;

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════\n";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────\n";

/// Complete analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Symbol of the analysed series, if known
    pub symbol: Option<String>,
    /// Display name of the generator that produced the markers
    pub generator: String,
    /// Configuration used
    pub config: AnalysisConfig,
    /// Statistics
    pub stats: AnalysisStats,
    /// Indicator series
    pub indicators: IndicatorSet,
    /// Markers in chronological order
    pub markers: Vec<Marker>,
}

impl AnalysisReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let stats = &self.stats;
        let mut s = String::new();

        s.push_str(RULE_HEAVY);
        s.push_str("                    SIGNAL ANALYSIS REPORT                  \n");
        s.push_str(RULE_HEAVY);
        s.push('\n');

        s.push_str("SERIES\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!(
            "  Symbol:              {}\n",
            self.symbol.as_deref().unwrap_or("-")
        ));
        s.push_str(&format!("  Bars:                {}\n", stats.bars));
        if let Some((first, last)) = stats.span() {
            s.push_str(&format!(
                "  Span:                {} → {}\n",
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            ));
        }
        s.push_str(&format!("  Last Close:          {}\n", fmt_value(stats.last_close)));
        if let Some(change) = stats.change_pct {
            s.push_str(&format!("  Change:              {:+.2}%\n", change));
        }
        s.push('\n');

        s.push_str("INDICATORS (latest)\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!(
            "  SMA({}):{:pad$}{}\n",
            self.config.sma_period,
            "",
            fmt_value(stats.sma),
            pad = label_pad("SMA", self.config.sma_period)
        ));
        s.push_str(&format!(
            "  EMA({}):{:pad$}{}\n",
            self.config.ema_period,
            "",
            fmt_value(stats.ema),
            pad = label_pad("EMA", self.config.ema_period)
        ));
        let zone = stats
            .rsi_zone
            .map(|z| format!(" ({:?})", z).to_lowercase())
            .unwrap_or_default();
        s.push_str(&format!(
            "  RSI({}):{:pad$}{}{}\n",
            self.config.rsi_period,
            "",
            fmt_value(stats.rsi),
            zone,
            pad = label_pad("RSI", self.config.rsi_period)
        ));
        s.push_str(&format!("  MACD Line:           {}\n", fmt_value(stats.macd)));
        s.push_str(&format!("  MACD Signal:         {}\n", fmt_value(stats.macd_signal)));
        s.push_str(&format!("  MACD Histogram:      {}\n", fmt_value(stats.macd_histogram)));
        s.push('\n');

        s.push_str("SIGNALS\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!("  Generator:           {}\n", self.generator));
        s.push_str(&format!("  Buy Signals:         {}\n", stats.buy_signals));
        s.push_str(&format!("  Sell Signals:        {}\n", stats.sell_signals));
        for marker in &self.markers {
            s.push_str(&format!(
                "    {:<4} @ bar {:<6} {}\n",
                marker.text(),
                marker.index,
                format_time(marker.time)
            ));
        }
        s.push('\n');

        s.push_str(RULE_HEAVY);

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export markers to CSV.
    pub fn markers_to_csv(&self) -> String {
        let mut csv = String::from("time,datetime,index,direction,position\n");
        for marker in &self.markers {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                marker.time,
                format_time(marker.time),
                marker.index,
                marker.direction,
                marker.position
            ));
        }
        csv
    }
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

fn format_time(time: i64) -> String {
    DateTime::from_timestamp(time, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| time.to_string())
}

/// Padding that lines `NAME(period):` up with the fixed-width labels.
fn label_pad(name: &str, period: usize) -> usize {
    let width = name.len() + period.to_string().len() + 3;
    21usize.saturating_sub(width).max(1)
}
