//! Event Bus Port
//!
//! Defines the contract for metric event publish/subscribe.
//!
//! ## Usage
//!
//! ```no_run
//! use cockpit_domain::ports::MetricEventBus;
//! use cockpit_domain::{DatabaseId, Metric, MetricEvent};
//! use std::sync::Arc;
//!
//! async fn announce(event_bus: Arc<dyn MetricEventBus>) -> cockpit_domain::Result<()> {
//!     let event = MetricEvent::Tracked {
//!         metric: Metric::Cpu,
//!         database: DatabaseId::new("hyrise-1"),
//!     };
//!     event_bus.publish_event(event).await
//! }
//! ```

use crate::error::Result;
use crate::events::MetricEvent;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Boxed async stream of metric events
pub type MetricEventStream = Pin<Box<dyn Stream<Item = MetricEvent> + Send + Sync + 'static>>;

/// Metric event pub/sub
#[async_trait]
pub trait MetricEventBus: Send + Sync {
    /// Publish an event to all current subscribers
    ///
    /// Publishing with no subscribers is not an error.
    async fn publish_event(&self, event: MetricEvent) -> Result<()>;

    /// Subscribe to every event published from now on
    async fn subscribe_events(&self) -> Result<MetricEventStream>;

    /// Check if there are any active event subscribers
    fn has_subscribers(&self) -> bool;
}
