//! Domain ports
//!
//! Traits the pipeline depends on. Implementations live in
//! `cockpit-providers` (data sources, event buses) and
//! `cockpit-application` (classifiers).

/// Value classification port
pub mod classifier;
/// Backend data source port
pub mod data_source;
/// Event bus port
pub mod events;

pub use classifier::ValueClassifier;
pub use data_source::MetricDataSource;
pub use events::{MetricEventBus, MetricEventStream};
