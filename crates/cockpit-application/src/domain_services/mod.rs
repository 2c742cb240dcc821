//! Domain services
//!
//! Pure logic shared by the use cases: value classification and state-based
//! ranking.

/// Threshold and pass-through classifiers
pub mod classification;
/// State-grouped ranking of readings
pub mod ranking;

pub use classification::{PassThroughClassifier, ThresholdClassifier};
pub use ranking::{RankedDatabase, rank_readings};
