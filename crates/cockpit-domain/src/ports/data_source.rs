//! Metric Data Source Port
//!
//! Defines the contract for retrieving raw samples of one metric for one
//! database. Only the logical fetch mode matters to the pipeline: a request
//! carrying [`FetchParams`](crate::FetchParams) is a one-shot historic read,
//! a request without them is a snapshot taken on every refresh cycle.
//!
//! Transport, wire format and backend aggregation are the implementation's
//! concern.

use crate::error::Result;
use crate::value_objects::{FetchRequest, RawSample};
use async_trait::async_trait;

/// Backend sample retrieval
#[async_trait]
pub trait MetricDataSource: Send + Sync {
    /// Retrieve the raw sample described by `request`
    ///
    /// Implementations return fetch-boundary errors (`DataSource`,
    /// `InvalidResponse`); the caller converts them into stale transitions.
    async fn fetch(&self, request: &FetchRequest) -> Result<RawSample>;

    /// Short name used in logs
    fn provider_name(&self) -> &str;
}
