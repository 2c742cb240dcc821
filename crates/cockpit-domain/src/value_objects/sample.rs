//! Database identities, raw samples and their reduction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a monitored database instance (e.g. `hyrise-1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Wrap a database identifier
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatabaseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DatabaseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for DatabaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One numeric observation returned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// Observation time in nanoseconds since the epoch, when the backend reports it
    pub timestamp_ns: Option<i64>,
    /// Observed value
    pub value: f64,
}

impl SamplePoint {
    /// Point without a timestamp
    pub fn value(value: f64) -> Self {
        Self {
            timestamp_ns: None,
            value,
        }
    }

    /// Point observed at `timestamp_ns`
    pub fn at(timestamp_ns: i64, value: f64) -> Self {
        Self {
            timestamp_ns: Some(timestamp_ns),
            value,
        }
    }
}

/// Raw samples for one database, as fetched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Observations in backend order
    pub points: Vec<SamplePoint>,
}

impl RawSample {
    /// Sample holding a single untimed value
    pub fn single(value: f64) -> Self {
        Self {
            points: vec![SamplePoint::value(value)],
        }
    }

    /// Sample from a list of points
    pub fn from_points(points: Vec<SamplePoint>) -> Self {
        Self { points }
    }

    /// Whether the backend returned no observations
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reduction of a sample to one representative value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Arithmetic mean
    #[default]
    Mean,
    /// Most recent point (highest timestamp, else last in order)
    Last,
    /// Largest value
    Max,
    /// Smallest value
    Min,
    /// Sum of all values
    Sum,
}

impl Aggregation {
    /// Reduce `points` to one value
    ///
    /// Returns `None` when there is nothing to reduce or the result is not finite.
    pub fn reduce(self, points: &[SamplePoint]) -> Option<f64> {
        if points.is_empty() {
            return None;
        }
        let values = points.iter().map(|p| p.value);
        let reduced = match self {
            Self::Mean => {
                #[allow(clippy::cast_precision_loss)]
                let count = points.len() as f64;
                values.sum::<f64>() / count
            }
            Self::Last => {
                let timed = points
                    .iter()
                    .filter_map(|p| p.timestamp_ns.map(|ts| (ts, p.value)))
                    .max_by_key(|(ts, _)| *ts);
                match timed {
                    Some((_, value)) => value,
                    None => points.last()?.value,
                }
            }
            Self::Max => values.fold(f64::NEG_INFINITY, f64::max),
            Self::Min => values.fold(f64::INFINITY, f64::min),
            Self::Sum => values.sum(),
        };
        reduced.is_finite().then_some(reduced)
    }
}
