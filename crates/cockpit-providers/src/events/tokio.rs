//! Tokio Broadcast Event Bus
//!
//! Event bus implementation using tokio broadcast channels for
//! in-process distribution of metric events.
//!
//! ## Example
//!
//! ```ignore
//! use cockpit_providers::events::TokioEventBus;
//!
//! let bus = TokioEventBus::new();
//!
//! // Subscribe to events
//! let stream = bus.subscribe_events().await?;
//!
//! // Publish events
//! bus.publish_event(MetricEvent::Tracked { metric, database }).await?;
//! ```

use async_trait::async_trait;
use cockpit_domain::MetricEvent;
use cockpit_domain::error::Result;
use cockpit_domain::ports::{MetricEventBus, MetricEventStream};
use futures::stream;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

use crate::constants::EVENT_BUS_DEFAULT_CAPACITY;

/// Event bus using tokio broadcast channels
///
/// Events are broadcast to all active subscribers without persistence.
///
/// ## Capacity
///
/// When the channel is full, the oldest events are dropped and slow
/// subscribers see a lag warning instead of an error.
#[derive(Clone)]
pub struct TokioEventBus {
    sender: Arc<broadcast::Sender<MetricEvent>>,
    capacity: usize,
}

impl TokioEventBus {
    /// Create a new event bus with default capacity (1024)
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUS_DEFAULT_CAPACITY)
    }

    /// Create with custom capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events in the channel buffer
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
            capacity,
        }
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Get the current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TokioEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokioEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioEventBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[async_trait]
impl MetricEventBus for TokioEventBus {
    async fn publish_event(&self, event: MetricEvent) -> Result<()> {
        match self.sender.send(event) {
            Ok(count) => trace!("Published event to {} subscribers", count),
            Err(_) => trace!("Published event but no subscribers"),
        }
        Ok(())
    }

    async fn subscribe_events(&self) -> Result<MetricEventStream> {
        let receiver = self.sender.subscribe();

        // Convert broadcast receiver to a Stream that handles lagged errors
        let stream = stream::unfold(receiver, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(event) => return Some((event, rx)),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Metric event stream lagged by {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}
