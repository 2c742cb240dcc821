//! # Cockpit
//!
//! Fetches per-database monitoring metrics from a backend, classifies each
//! value as `low`, `average` or `high`, and ranks the selected databases per
//! metric.
//!
//! ## Example
//!
//! ```ignore
//! use cockpit::infrastructure::{CockpitContext, ConfigLoader};
//! use cockpit::{DatabaseId, Metric, MetricValueStateOrder};
//!
//! let context = CockpitContext::from_config(ConfigLoader::new().load()?)?;
//! let comparison = context.comparison();
//! comparison.select_metric(Metric::Cpu).await;
//! comparison.select_database(DatabaseId::new("hyrise-1")).await;
//! let ranking = comparison.rank_databases(Metric::Cpu, MetricValueStateOrder::Desc);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Metric identities, value objects, events, errors and ports
//! - `application` - Metric registry, transformation units and comparison
//! - `providers` - HTTP and in-memory data sources, event buses
//! - `infrastructure` - Configuration, logging and wiring

/// Domain layer - metric identities, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use cockpit_domain::*;
}

/// Application layer - registry, transformation units and comparison
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use cockpit_application::*;
}

/// Provider implementations - data sources and event buses
pub mod providers {
    pub use cockpit_providers::*;
}

/// Infrastructure layer - configuration, logging and wiring
pub mod infrastructure {
    pub use cockpit_infrastructure::*;
}

pub mod cli;
pub mod watch;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use cli::Cli;
pub use watch::run;
