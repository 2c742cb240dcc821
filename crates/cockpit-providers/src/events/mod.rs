//! Event Bus Implementations
//!
//! Provides event bus backends for metric events.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | NullEventBus | Silent | Discards all events |
//! | TokioEventBus | In-Process | Tokio broadcast channels |

pub mod null;
pub mod tokio;

pub use null::NullEventBus;
pub use tokio::TokioEventBus;

// Re-export port trait from domain layer
pub use cockpit_domain::ports::{MetricEventBus, MetricEventStream};
