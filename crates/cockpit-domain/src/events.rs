//! Metric events
//!
//! Published by transformation units whenever a (unit, database) pair changes
//! state, so views can re-render without polling the units.

use crate::value_objects::{DatabaseId, Metric, MetricReading};
use serde::{Deserialize, Serialize};

/// Notification emitted by a transformation unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricEvent {
    /// A database was registered with the unit
    Tracked {
        /// Unit metric
        metric: Metric,
        /// Registered database
        database: DatabaseId,
    },
    /// A fetch completed and replaced the current value
    ValueUpdated {
        /// Unit metric
        metric: Metric,
        /// Updated database
        database: DatabaseId,
        /// New classified reading
        reading: MetricReading,
    },
    /// A fetch failed; the previous value (if any) is retained
    MarkedStale {
        /// Unit metric
        metric: Metric,
        /// Degraded database
        database: DatabaseId,
        /// Failure description
        reason: String,
        /// Value still being served
        last_known: Option<f64>,
    },
    /// A database was unregistered and its fetches cancelled
    Untracked {
        /// Unit metric
        metric: Metric,
        /// Unregistered database
        database: DatabaseId,
    },
}

impl MetricEvent {
    /// Metric the event belongs to
    pub fn metric(&self) -> Metric {
        match self {
            Self::Tracked { metric, .. }
            | Self::ValueUpdated { metric, .. }
            | Self::MarkedStale { metric, .. }
            | Self::Untracked { metric, .. } => *metric,
        }
    }

    /// Database the event belongs to
    pub fn database(&self) -> &DatabaseId {
        match self {
            Self::Tracked { database, .. }
            | Self::ValueUpdated { database, .. }
            | Self::MarkedStale { database, .. }
            | Self::Untracked { database, .. } => database,
        }
    }
}
