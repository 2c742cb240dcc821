//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in cockpit-domain) and infrastructure constants.

// ============================================================================
// BACKEND MONITOR API CONSTANTS
// ============================================================================

/// Response key of the access (chunk) monitor route
pub const RESPONSE_KEY_ACCESS: &str = "chunks_data";

/// Response key of the system data monitor route (cpu and ram)
pub const RESPONSE_KEY_SYSTEM_DATA: &str = "system_data";

/// Response key of the latency monitor route
pub const RESPONSE_KEY_LATENCY: &str = "latency";

/// Response key of the queue length monitor route
pub const RESPONSE_KEY_QUEUE_LENGTH: &str = "queue_length";

/// Response key of the storage monitor route
pub const RESPONSE_KEY_STORAGE: &str = "storage";

/// Response key of the throughput monitor route
pub const RESPONSE_KEY_THROUGHPUT: &str = "throughput";

/// JSON pointer narrowing system data to the cpu usage
pub const CPU_VALUE_POINTER: &str = "/cpu/cpu_process_usage";

/// JSON pointer narrowing system data to the memory usage
pub const RAM_VALUE_POINTER: &str = "/memory/percent";

/// Envelope field carrying the per-metric payload
pub const ENVELOPE_BODY: &str = "body";

/// Historical list field carrying the database id
pub const HISTORIC_ID_FIELD: &str = "id";

/// Field carrying a sample timestamp (nanoseconds)
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Query parameter: window start (nanoseconds)
pub const QUERY_START_TS: &str = "startts";

/// Query parameter: window end (nanoseconds)
pub const QUERY_END_TS: &str = "endts";

/// Query parameter: sample precision (nanoseconds)
pub const QUERY_PRECISION: &str = "precision";

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP request timeout in milliseconds (backend monitor routes)
pub const HTTP_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// HTTP client maximum idle connections per host
pub const HTTP_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client idle connection timeout in seconds
pub const HTTP_CLIENT_IDLE_TIMEOUT_SECS: u64 = 90;

/// HTTP TCP keep-alive interval in seconds
pub const HTTP_KEEPALIVE_SECS: u64 = 60;

// ============================================================================
// EVENTS PROVIDER CONSTANTS
// ============================================================================

/// Default broadcast channel capacity
pub const EVENT_BUS_DEFAULT_CAPACITY: usize = 1024;
