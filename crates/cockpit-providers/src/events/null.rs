//! Null Event Bus
//!
//! Discards every event; subscriptions end immediately.
//!
//! ## Usage
//!
//! ```rust
//! use cockpit_providers::events::NullEventBus;
//!
//! let bus = NullEventBus::new();
//! // All events are silently discarded
//! ```

use async_trait::async_trait;
use cockpit_domain::MetricEvent;
use cockpit_domain::error::Result;
use cockpit_domain::ports::{MetricEventBus, MetricEventStream};
use futures::stream;
use std::sync::Arc;

/// Event bus that discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventBus;

impl NullEventBus {
    /// Create a new null event bus
    pub fn new() -> Self {
        Self
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl MetricEventBus for NullEventBus {
    async fn publish_event(&self, _event: MetricEvent) -> Result<()> {
        Ok(())
    }

    async fn subscribe_events(&self) -> Result<MetricEventStream> {
        Ok(Box::pin(stream::empty()))
    }

    fn has_subscribers(&self) -> bool {
        false
    }
}
