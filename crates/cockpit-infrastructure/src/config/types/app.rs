//! Main application configuration

use super::{
    BackendConfig, ClassificationConfig, EventBusConfig, HistoryConfig, LoggingConfig,
    RefreshConfig,
};
use serde::{Deserialize, Serialize};

/// Root configuration of the metric pipeline
///
/// Every section falls back to its defaults, so a partial TOML file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend monitor location
    pub backend: BackendConfig,
    /// Refresh cadence of `modify` metrics
    pub refresh: RefreshConfig,
    /// Per-metric thresholds and aggregation
    pub classification: ClassificationConfig,
    /// Historic window for `read` metrics
    pub history: HistoryConfig,
    /// Event bus backend
    pub event_bus: EventBusConfig,
    /// Logging output
    pub logging: LoggingConfig,
}
