//! Historic window configuration types

use crate::constants::*;
use cockpit_domain::FetchParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Historic window used for `read` metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Window length in seconds, ending now
    pub range_secs: u64,

    /// Sample precision in seconds
    pub precision_secs: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            range_secs: DEFAULT_HISTORY_RANGE_SECS,
            precision_secs: DEFAULT_HISTORY_PRECISION_SECS,
        }
    }
}

impl HistoryConfig {
    /// Window of `range_secs` ending at the current time
    pub fn window(&self) -> FetchParams {
        FetchParams::trailing(
            Duration::from_secs(self.range_secs),
            Duration::from_secs(self.precision_secs),
        )
    }
}
