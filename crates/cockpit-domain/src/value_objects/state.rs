//! Qualitative value states and their ordering directions

use crate::constants::{STATE_COLOR_AVERAGE, STATE_COLOR_HIGH, STATE_COLOR_LOW};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative bucket assigned to a numeric metric value
///
/// There is no absolute order between states; ordering only exists relative
/// to a [`MetricValueStateOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricValueState {
    /// Below the metric's lower threshold
    Low,
    /// Between the metric's thresholds
    Average,
    /// Above the metric's upper threshold
    High,
}

impl MetricValueState {
    /// Tile color of the state
    ///
    /// Polarity is metric-agnostic: `High` is green for every metric.
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => STATE_COLOR_LOW,
            Self::Average => STATE_COLOR_AVERAGE,
            Self::High => STATE_COLOR_HIGH,
        }
    }

    /// Wire name of the state
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Average => "average",
            Self::High => "high",
        }
    }

    /// The mirrored state (`Low` and `High` swap, `Average` stays)
    pub fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::Average => Self::Average,
            Self::High => Self::Low,
        }
    }
}

impl fmt::Display for MetricValueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricValueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "average" => Ok(Self::Average),
            "high" => Ok(Self::High),
            _ => Err(Error::unknown_state(s)),
        }
    }
}

/// Direction used to order states for comparison views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricValueStateOrder {
    /// low, average, high
    Asc,
    /// high, average, low
    #[default]
    Desc,
}

impl MetricValueStateOrder {
    /// States in this direction
    ///
    /// Returns an owned array, so callers can never reach a shared table.
    pub fn states(self) -> [MetricValueState; 3] {
        match self {
            Self::Asc => [
                MetricValueState::Low,
                MetricValueState::Average,
                MetricValueState::High,
            ],
            Self::Desc => [
                MetricValueState::High,
                MetricValueState::Average,
                MetricValueState::Low,
            ],
        }
    }

    /// Rank of `state` within this direction (0 comes first)
    pub fn position(self, state: MetricValueState) -> usize {
        match (self, state) {
            (Self::Asc, MetricValueState::Low) | (Self::Desc, MetricValueState::High) => 0,
            (_, MetricValueState::Average) => 1,
            (Self::Asc, MetricValueState::High) | (Self::Desc, MetricValueState::Low) => 2,
        }
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Wire name of the order
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for MetricValueStateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricValueStateOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(Error::unknown_order(s)),
        }
    }
}
