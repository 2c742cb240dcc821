//! # Cockpit - Provider Implementations
//!
//! This crate contains the user-selectable implementations of the ports
//! defined in `cockpit-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Data Source | `MetricDataSource` | Http, InMemory |
//! | Events | `MetricEventBus` | Tokio, Null |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! cockpit-providers = { version = "0.1", default-features = false, features = ["source-memory"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cockpit_providers::data_source::HttpMetricDataSource;
//! use cockpit_providers::events::TokioEventBus;
//! ```

// Re-export cockpit-domain types commonly used with providers
pub use cockpit_domain::error::{Error, Result};
pub use cockpit_domain::ports::{MetricDataSource, MetricEventBus};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Metric data source implementations
///
/// Implements `MetricDataSource` for the backend monitor API and for
/// scripted in-process samples.
pub mod data_source;

/// Event bus implementations
///
/// Implements `MetricEventBus` for in-process broadcast and silent operation.
pub mod events;

/// HTTP client configuration
///
/// Provides `HttpClientConfig` and the client builder used by
/// the HTTP data source.
#[cfg(feature = "source-http")]
pub mod http;

// Internal tests module (can access crate internals)
#[cfg(test)]
mod tests;
