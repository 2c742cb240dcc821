//! EventBus configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// EventBus provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventBusProvider {
    /// In-process broadcast channel (Tokio)
    #[default]
    Tokio,
    /// No-op event bus
    Null,
}

/// EventBus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// EventBus provider to use
    pub provider: EventBusProvider,

    /// Number of events buffered before slow subscribers lag
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            provider: EventBusProvider::Tokio,
            capacity: DEFAULT_EVENT_BUS_CAPACITY,
        }
    }
}

impl EventBusConfig {
    /// Silent bus
    pub fn null() -> Self {
        Self {
            provider: EventBusProvider::Null,
            ..Default::default()
        }
    }
}
