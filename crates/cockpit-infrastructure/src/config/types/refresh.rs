//! Refresh configuration types

use crate::constants::*;
use cockpit_application::RefreshTiming;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Refresh loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Poll interval of `modify` metrics in milliseconds
    pub interval_ms: u64,

    /// A fetch running longer than this counts as failed
    pub fetch_timeout_ms: u64,

    /// Cached `read` snapshots per metric
    pub snapshot_capacity: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
        }
    }
}

impl RefreshConfig {
    /// Timing handed to every transformation unit
    pub fn timing(&self) -> RefreshTiming {
        RefreshTiming {
            interval: Duration::from_millis(self.interval_ms),
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
        }
    }
}
