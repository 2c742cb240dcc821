//! Classified readings and per-database tracking status

use super::MetricValueState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a (unit, database) pair
///
/// ```text
/// Unregistered -> Pending -> Fresh <-> Refreshing -> Stale -> Fresh
///                                                         \-> Unregistered
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Never registered, or explicitly unregistered
    Unregistered,
    /// Registered, first value not yet available
    Pending,
    /// Latest fetch succeeded
    Fresh,
    /// A newer fetch is in flight; the previous value is still served
    Refreshing,
    /// Latest fetch failed; the previous value (if any) is retained
    Stale,
}

impl EntryStatus {
    /// Whether the pair is registered with its unit
    pub fn is_tracked(self) -> bool {
        !matches!(self, Self::Unregistered)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unregistered => "unregistered",
            Self::Pending => "pending",
            Self::Fresh => "fresh",
            Self::Refreshing => "refreshing",
            Self::Stale => "stale",
        };
        f.write_str(name)
    }
}

/// Quality of the value carried by a [`MetricReading`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Produced by the latest completed fetch
    Fresh,
    /// Still the latest value; a refresh is in flight
    Refreshing,
    /// Last-known-good value; the latest fetch failed
    Stale,
}

/// Display-ready classified value of one database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    /// Representative numeric value
    pub value: f64,
    /// Classified state of `value`
    pub state: MetricValueState,
    /// Whether `value` reflects the latest fetch
    pub freshness: Freshness,
    /// When `value` was fetched
    pub updated_at: DateTime<Utc>,
}

impl MetricReading {
    /// Whether the UI should render a degraded-data indicator
    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}
