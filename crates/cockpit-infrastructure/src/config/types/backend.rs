//! Backend configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Monitor root; metric bases are appended verbatim
    pub url: String,

    /// HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// User agent sent with every request
    pub user_agent: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

impl BackendConfig {
    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
