//! Value classifiers
//!
//! Thresholds come from configuration; nothing here hardcodes a cutoff.

use cockpit_domain::MetricValueState;
use cockpit_domain::error::{Error, Result};
use cockpit_domain::ports::ValueClassifier;

/// Two-threshold classifier
///
/// `value < low_below` is `Low`, `value > high_above` is `High`, anything in
/// between (inclusive) is `Average`. With `invert` set, `Low` and `High` swap
/// after bucketing, for metrics where a large value is the bad case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdClassifier {
    low_below: f64,
    high_above: f64,
    invert: bool,
}

impl ThresholdClassifier {
    /// Create a classifier; fails if the thresholds are not ordered or finite
    pub fn new(low_below: f64, high_above: f64) -> Result<Self> {
        if !low_below.is_finite() || !high_above.is_finite() {
            return Err(Error::configuration(format!(
                "Classification thresholds must be finite (low_below={low_below}, high_above={high_above})"
            )));
        }
        if low_below > high_above {
            return Err(Error::configuration(format!(
                "low_below ({low_below}) must not exceed high_above ({high_above})"
            )));
        }
        Ok(Self {
            low_below,
            high_above,
            invert: false,
        })
    }

    /// Swap `Low` and `High` after bucketing
    #[must_use]
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Lower threshold
    pub fn low_below(&self) -> f64 {
        self.low_below
    }

    /// Upper threshold
    pub fn high_above(&self) -> f64 {
        self.high_above
    }
}

impl ValueClassifier for ThresholdClassifier {
    fn classify(&self, value: f64) -> MetricValueState {
        let state = if value < self.low_below {
            MetricValueState::Low
        } else if value > self.high_above {
            MetricValueState::High
        } else {
            MetricValueState::Average
        };
        if self.invert { state.inverted() } else { state }
    }
}

/// Classifier for metrics without configured thresholds
///
/// Reports every value as `Average`, so ranking falls back to the numeric
/// tie-break alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughClassifier;

impl ValueClassifier for PassThroughClassifier {
    fn classify(&self, _value: f64) -> MetricValueState {
        MetricValueState::Average
    }
}
