//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Cockpit metric pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Metric name outside the closed metric set
    #[error("Unknown metric: {name}")]
    UnknownMetric {
        /// The name that failed to parse
        name: String,
    },

    /// State name outside {low, average, high}
    #[error("Unknown metric value state: {name}")]
    UnknownState {
        /// The name that failed to parse
        name: String,
    },

    /// Order name outside {asc, desc}
    #[error("Unknown metric value state order: {name}")]
    UnknownOrder {
        /// The name that failed to parse
        name: String,
    },

    /// Database was never registered with the unit
    #[error("Database '{database}' is not tracked for metric {metric}")]
    NotTracked {
        /// Metric of the queried unit
        metric: String,
        /// Queried database
        database: String,
    },

    /// No fetch has completed yet for the database
    #[error("No data yet for database '{database}' on metric {metric}")]
    NoDataYet {
        /// Metric of the queried unit
        metric: String,
        /// Queried database
        database: String,
    },

    /// Operation requires a different fetch type
    #[error("Metric {metric} does not support {operation}")]
    UnsupportedFetchType {
        /// Metric of the unit
        metric: String,
        /// Rejected operation
        operation: String,
    },

    /// Backend data source failure (transport or status)
    #[error("Data source error: {message}")]
    DataSource {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Fetch did not resolve within the configured bound
    #[error("Fetch timed out after {timeout_ms} ms: {message}")]
    Timeout {
        /// What timed out
        message: String,
        /// Timeout bound in milliseconds
        timeout_ms: u64,
    },

    /// Backend answered with a payload of unexpected shape
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of the shape problem
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Parsing error creation methods
impl Error {
    /// Create an unknown metric error
    pub fn unknown_metric<S: Into<String>>(name: S) -> Self {
        Self::UnknownMetric { name: name.into() }
    }

    /// Create an unknown state error
    pub fn unknown_state<S: Into<String>>(name: S) -> Self {
        Self::UnknownState { name: name.into() }
    }

    /// Create an unknown order error
    pub fn unknown_order<S: Into<String>>(name: S) -> Self {
        Self::UnknownOrder { name: name.into() }
    }
}

// Tracking error creation methods
impl Error {
    /// Create a not tracked error
    pub fn not_tracked(metric: impl std::fmt::Display, database: impl std::fmt::Display) -> Self {
        Self::NotTracked {
            metric: metric.to_string(),
            database: database.to_string(),
        }
    }

    /// Create a no data yet error
    pub fn no_data_yet(metric: impl std::fmt::Display, database: impl std::fmt::Display) -> Self {
        Self::NoDataYet {
            metric: metric.to_string(),
            database: database.to_string(),
        }
    }

    /// Create an unsupported fetch type error
    pub fn unsupported_fetch_type<S: Into<String>>(
        metric: impl std::fmt::Display,
        operation: S,
    ) -> Self {
        Self::UnsupportedFetchType {
            metric: metric.to_string(),
            operation: operation.into(),
        }
    }
}

// Fetch boundary error creation methods
impl Error {
    /// Create a data source error
    pub fn data_source<S: Into<String>>(message: S) -> Self {
        Self::DataSource {
            message: message.into(),
            source: None,
        }
    }

    /// Create a data source error with source
    pub fn data_source_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::DataSource {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(message: S, timeout: std::time::Duration) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

// Configuration and internal error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification methods
impl Error {
    /// Whether the caller can recover by waiting, registering or retrying
    ///
    /// Parse errors for closed enumerations are programming errors and are
    /// never recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotTracked { .. }
                | Self::NoDataYet { .. }
                | Self::DataSource { .. }
                | Self::Timeout { .. }
                | Self::InvalidResponse { .. }
        )
    }

    /// Whether the error originated at the fetch boundary
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::DataSource { .. } | Self::Timeout { .. } | Self::InvalidResponse { .. }
        )
    }
}
