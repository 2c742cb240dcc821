//! Value Classifier Port
//!
//! Maps a representative numeric value to a qualitative state. Thresholds
//! are metric-specific configuration; the pipeline never assumes fixed
//! cutoffs.
//!
//! Any `Fn(f64) -> MetricValueState` closure is a classifier:
//!
//! ```
//! use cockpit_domain::ports::ValueClassifier;
//! use cockpit_domain::MetricValueState;
//!
//! let classifier = |value: f64| {
//!     if value > 0.5 { MetricValueState::High } else { MetricValueState::Low }
//! };
//! assert_eq!(classifier.classify(0.9), MetricValueState::High);
//! ```

use crate::value_objects::MetricValueState;

/// Numeric-to-state classification
pub trait ValueClassifier: Send + Sync {
    /// Classify a representative value
    fn classify(&self, value: f64) -> MetricValueState;
}

impl<F> ValueClassifier for F
where
    F: Fn(f64) -> MetricValueState + Send + Sync,
{
    fn classify(&self, value: f64) -> MetricValueState {
        self(value)
    }
}
