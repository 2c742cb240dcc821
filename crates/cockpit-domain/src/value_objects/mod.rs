//! Value objects of the metric pipeline

/// Fetch parameters and requests
pub mod fetch;
/// Metric identities and fetch types
pub mod metric;
/// Classified readings and tracking status
pub mod reading;
/// Database identities, samples and aggregation
pub mod sample;
/// Value states and orderings
pub mod state;

pub use fetch::{FetchParams, FetchRequest, HistoricRange};
pub use metric::{FetchType, Metric};
pub use reading::{EntryStatus, Freshness, MetricReading};
pub use sample::{Aggregation, DatabaseId, RawSample, SamplePoint};
pub use state::{MetricValueState, MetricValueStateOrder};
