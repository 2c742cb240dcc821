//! Fetch parameters and requests handed to data sources

use super::{DatabaseId, FetchType, Metric};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Closed-open historic interval in nanoseconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoricRange {
    /// Interval start (exclusive on the backend side)
    pub start_ns: i64,
    /// Interval end (inclusive on the backend side)
    pub end_ns: i64,
}

impl HistoricRange {
    /// Interval between two timestamps
    pub fn new(start_ns: i64, end_ns: i64) -> Self {
        Self { start_ns, end_ns }
    }

    /// Interval of length `span` ending at `end`
    pub fn ending_at(end: DateTime<Utc>, span: Duration) -> Self {
        let end_ns = end.timestamp_nanos_opt().unwrap_or(i64::MAX);
        let span_ns = i64::try_from(span.as_nanos()).unwrap_or(i64::MAX);
        Self {
            start_ns: end_ns.saturating_sub(span_ns),
            end_ns,
        }
    }

    /// Length of the interval in nanoseconds
    pub fn span_ns(&self) -> i64 {
        self.end_ns.saturating_sub(self.start_ns)
    }
}

/// Parameter tuple of a `read` fetch
///
/// Two reads with equal parameters for the same database are the same
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchParams {
    /// Historic interval to aggregate over
    pub range: HistoricRange,
    /// Bucket width in nanoseconds
    pub precision_ns: u64,
}

impl FetchParams {
    /// Parameters from a range and a precision
    pub fn new(range: HistoricRange, precision: Duration) -> Self {
        Self {
            range,
            precision_ns: u64::try_from(precision.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Window of `span` ending now
    pub fn trailing(span: Duration, precision: Duration) -> Self {
        Self::new(HistoricRange::ending_at(Utc::now(), span), precision)
    }
}

/// One retrieval handed to a [`crate::ports::MetricDataSource`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    /// Metric being fetched
    pub metric: Metric,
    /// Fully-qualified backend locator (`root + base`)
    pub endpoint: String,
    /// Database whose sample is requested
    pub database: DatabaseId,
    /// Historic parameters; present for `read` fetches only
    pub params: Option<FetchParams>,
}

impl FetchRequest {
    /// Build a request
    pub fn new(
        metric: Metric,
        endpoint: impl Into<String>,
        database: DatabaseId,
        params: Option<FetchParams>,
    ) -> Self {
        Self {
            metric,
            endpoint: endpoint.into(),
            database,
            params,
        }
    }

    /// Retrieval mode implied by the request
    pub fn fetch_type(&self) -> FetchType {
        if self.params.is_some() {
            FetchType::Read
        } else {
            FetchType::Modify
        }
    }
}
