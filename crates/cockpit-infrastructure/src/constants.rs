//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `cockpit_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cockpit.toml";

/// Project-local configuration directory name
pub const LOCAL_CONFIG_DIR: &str = "config";

/// Per-user configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cockpit";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "COCKPIT";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// BACKEND CONSTANTS
// ============================================================================

/// Default backend monitor root
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/monitor/";

/// Default HTTP request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// REFRESH CONSTANTS
// ============================================================================

/// Default refresh interval for `modify` metrics in milliseconds
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1_000;

/// Default bound on a single fetch in milliseconds
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2_000;

/// Default number of cached `read` snapshots per metric
pub const DEFAULT_SNAPSHOT_CAPACITY: u64 = 4_096;

// ============================================================================
// HISTORY CONSTANTS
// ============================================================================

/// Default historic window length in seconds
pub const DEFAULT_HISTORY_RANGE_SECS: u64 = 60;

/// Default historic precision in seconds
pub const DEFAULT_HISTORY_PRECISION_SECS: u64 = 1;

// ============================================================================
// EVENT BUS CONSTANTS
// ============================================================================

/// Default event bus buffer capacity
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1_024;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "COCKPIT_LOG";

/// File name prefix of rolled log files
pub const LOG_FILE_PREFIX: &str = "cockpit";
