//! Domain layer constants
//!
//! Visual and naming constants that belong to the metric domain itself.
//! Runtime defaults (intervals, timeouts, URLs) live in the infrastructure
//! crate.

// ============================================================================
// STATE COLORS
// ============================================================================

/// Tile color for values classified as `low` (red)
pub const STATE_COLOR_LOW: &str = "#ff5252";

/// Tile color for values classified as `average` (amber)
pub const STATE_COLOR_AVERAGE: &str = "#fb8c00";

/// Tile color for values classified as `high` (green)
pub const STATE_COLOR_HIGH: &str = "#4caf50";

// ============================================================================
// BACKEND RESOURCES
// ============================================================================

/// Backend resource holding chunk access counters
pub const BASE_CHUNKS: &str = "chunks";

/// Backend resource holding CPU and memory readings
pub const BASE_SYSTEM_DATA: &str = "system_data";

/// Backend resource holding mean query latency
pub const BASE_LATENCY: &str = "latency";

/// Backend resource holding scheduler queue lengths
pub const BASE_QUEUE_LENGTH: &str = "queue_length";

/// Backend resource holding table storage metadata
pub const BASE_STORAGE: &str = "storage";

/// Backend resource holding query throughput
pub const BASE_THROUGHPUT: &str = "throughput";
