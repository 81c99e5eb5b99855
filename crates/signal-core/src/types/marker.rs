//! Chart markers produced by signal generators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trade marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Label shown next to the marker.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }

    /// Where the marker is drawn relative to its bar.
    pub fn position(&self) -> MarkerPosition {
        match self {
            Direction::Buy => MarkerPosition::BelowBar,
            Direction::Sell => MarkerPosition::AboveBar,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Placement hint for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    BelowBar,
    AboveBar,
}

impl fmt::Display for MarkerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerPosition::BelowBar => f.write_str("belowBar"),
            MarkerPosition::AboveBar => f.write_str("aboveBar"),
        }
    }
}

/// A directional marker attached to one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Timestamp of the bar (seconds)
    pub time: i64,
    /// Index of the bar within its series
    pub index: usize,
    /// Buy or sell
    pub direction: Direction,
    /// Placement relative to the bar
    pub position: MarkerPosition,
}

impl Marker {
    /// Create a marker, deriving its position from the direction.
    pub fn new(time: i64, index: usize, direction: Direction) -> Self {
        Self {
            time,
            index,
            direction,
            position: direction.position(),
        }
    }

    /// Text label for the marker.
    pub fn text(&self) -> &'static str {
        self.direction.label()
    }
}
