//! HTTP Client Configuration
//!
//! Settings for the pooled reqwest client shared by every HTTP-backed
//! provider, and the builder that turns them into a client.
//!
//! ## Contents
//!
//! - `HttpClientConfig` - Configuration for HTTP client settings
//! - `build_client` - Build a reqwest `Client` from the configuration
//! - `HttpResponseUtils` - Utilities for handling HTTP responses (re-exported from utils)

use crate::constants::{
    HTTP_CLIENT_IDLE_TIMEOUT_SECS, HTTP_KEEPALIVE_SECS, HTTP_MAX_IDLE_PER_HOST,
    HTTP_REQUEST_TIMEOUT_MS,
};
use cockpit_domain::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use crate::utils::HttpResponseUtils;

/// HTTP client configuration
///
/// Controls connection pooling, timeouts, and other HTTP client behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Maximum idle connections per host
    pub max_idle_per_host: usize,
    /// Idle connection timeout
    pub idle_timeout: Duration,
    /// TCP keep-alive duration
    pub keepalive: Duration,
    /// Total timeout for requests
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: HTTP_MAX_IDLE_PER_HOST,
            idle_timeout: Duration::from_secs(HTTP_CLIENT_IDLE_TIMEOUT_SECS),
            keepalive: Duration::from_secs(HTTP_KEEPALIVE_SECS),
            timeout: Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS),
            user_agent: format!("cockpit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create configuration with custom timeout only
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    /// Override the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a pooled client from `config`
pub fn build_client(config: &HttpClientConfig) -> Result<Client> {
    Client::builder()
        .pool_max_idle_per_host(config.max_idle_per_host)
        .pool_idle_timeout(config.idle_timeout)
        .tcp_keepalive(config.keepalive)
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::configuration_with_source("Failed to build HTTP client", e))
}
