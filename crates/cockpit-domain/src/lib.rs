//! Domain layer - Cockpit metric pipeline
//!
//! Closed metric identities, qualitative value states, sample and reading
//! value objects, domain events and the ports the pipeline depends on.
//!
//! ## Architecture
//!
//! The domain layer:
//! - Defines the closed enumerations every lookup is keyed on
//! - Defines the value objects flowing between fetch, classification and ranking
//! - Declares ports (traits) for data sources, classifiers and the event bus
//! - Has no dependencies on transport, configuration or runtime crates
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `value_objects` | `Metric`, `MetricValueState`, `MetricValueStateOrder`, samples, readings |
//! | `events` | `MetricEvent` published by transformation units |
//! | `ports` | `MetricDataSource`, `ValueClassifier`, `MetricEventBus` |
//! | `error` | Domain `Error` and `Result` |

pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use events::MetricEvent;
pub use value_objects::*;
