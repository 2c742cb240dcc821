//! Metric Data Source Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | HttpMetricDataSource | Remote | Backend monitor API over HTTP |
//! | InMemoryDataSource | Testing/Demo | Scripted responses with gates and counters |

#[cfg(feature = "source-http")]
pub mod extract;
#[cfg(feature = "source-http")]
pub mod http;
#[cfg(feature = "source-memory")]
pub mod in_memory;

#[cfg(feature = "source-http")]
pub use extract::{extract_sample, response_key};
#[cfg(feature = "source-http")]
pub use http::HttpMetricDataSource;
#[cfg(feature = "source-memory")]
pub use in_memory::{InMemoryDataSource, SampleGenerator};

// Re-export port trait from domain layer
pub use cockpit_domain::ports::MetricDataSource;
