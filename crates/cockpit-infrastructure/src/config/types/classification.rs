//! Classification configuration types
//!
//! Thresholds are configuration values; the application layer ships no fixed
//! cutoffs. Metrics without an entry fall back to a pass-through classifier.

use cockpit_application::{ThresholdClassifier, UnitSettings};
use cockpit_domain::error::{Error, Result};
use cockpit_domain::{Aggregation, Metric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Thresholds and aggregation of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Values below this are `low`
    pub low_below: f64,

    /// Values above this are `high`
    pub high_above: f64,

    /// Swap `low` and `high` after bucketing
    #[serde(default)]
    pub invert: bool,

    /// Reduction of sample points to one value
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl ThresholdConfig {
    /// Non-inverted thresholds with mean aggregation
    pub fn new(low_below: f64, high_above: f64) -> Self {
        Self {
            low_below,
            high_above,
            invert: false,
            aggregation: Aggregation::Mean,
        }
    }

    /// Unit settings built from these thresholds
    pub fn unit_settings(&self) -> Result<UnitSettings> {
        let classifier =
            ThresholdClassifier::new(self.low_below, self.high_above)?.inverted(self.invert);
        Ok(UnitSettings::new(Arc::new(classifier), self.aggregation))
    }
}

/// Partial thresholds of one classification entry
///
/// Fields left out keep the value of an entry sorting before this one for
/// the same metric, usually the built-in default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverride {
    /// Values below this are `low`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_below: Option<f64>,

    /// Values above this are `high`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_above: Option<f64>,

    /// Swap `low` and `high` after bucketing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,

    /// Reduction of sample points to one value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
}

impl ThresholdOverride {
    /// Fields set in `later` replace those of `self`
    fn overlay(self, later: &Self) -> Self {
        Self {
            low_below: later.low_below.or(self.low_below),
            high_above: later.high_above.or(self.high_above),
            invert: later.invert.or(self.invert),
            aggregation: later.aggregation.or(self.aggregation),
        }
    }

    fn complete(self, metric: Metric) -> Result<ThresholdConfig> {
        let missing = |field: &str| {
            Error::configuration(format!(
                "Incomplete thresholds for {metric}: missing {field}"
            ))
        };
        Ok(ThresholdConfig {
            low_below: self.low_below.ok_or_else(|| missing("low_below"))?,
            high_above: self.high_above.ok_or_else(|| missing("high_above"))?,
            invert: self.invert.unwrap_or(false),
            aggregation: self.aggregation.unwrap_or_default(),
        })
    }
}

impl From<ThresholdConfig> for ThresholdOverride {
    fn from(thresholds: ThresholdConfig) -> Self {
        Self {
            low_below: Some(thresholds.low_below),
            high_above: Some(thresholds.high_above),
            invert: Some(thresholds.invert),
            aggregation: Some(thresholds.aggregation),
        }
    }
}

/// Per-metric classification, keyed by metric name
///
/// Keys are matched case-insensitively, so `queueLength`, `queue_length` and
/// the lowercased environment form all address the same metric. Entries for
/// one metric are layered: the canonical spelling first, then the others in
/// key order, each replacing only the fields it sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationConfig(pub BTreeMap<String, ThresholdOverride>);

impl Default for ClassificationConfig {
    fn default() -> Self {
        let entries = [
            (Metric::Access, ThresholdConfig::new(100.0, 1_000.0)),
            (Metric::Cpu, ThresholdConfig::new(30.0, 70.0)),
            (Metric::Latency, ThresholdConfig::new(1.0e6, 1.0e7)),
            (Metric::QueueLength, ThresholdConfig::new(10.0, 100.0)),
            (Metric::Ram, ThresholdConfig::new(30.0, 70.0)),
            (Metric::Storage, ThresholdConfig::new(1.0e8, 1.0e9)),
            (Metric::Throughput, ThresholdConfig::new(100.0, 1_000.0)),
        ];
        Self(
            entries
                .into_iter()
                .map(|(metric, thresholds)| (metric.as_str().to_string(), thresholds.into()))
                .collect(),
        )
    }
}

impl ClassificationConfig {
    /// No entries; every metric passes through
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Set the thresholds of `metric`, replacing any entry under another spelling
    #[must_use]
    pub fn with(mut self, metric: Metric, thresholds: ThresholdConfig) -> Self {
        self.0
            .retain(|key, _| !key.parse::<Metric>().is_ok_and(|parsed| parsed == metric));
        self.0.insert(metric.as_str().to_string(), thresholds.into());
        self
    }

    /// Entries resolved to metrics
    ///
    /// Unknown names are rejected, as is a metric whose layered entries
    /// leave either threshold unset.
    pub fn resolve(&self) -> Result<BTreeMap<Metric, ThresholdConfig>> {
        let mut layers: BTreeMap<Metric, Vec<(bool, &ThresholdOverride)>> = BTreeMap::new();
        for (key, entry) in &self.0 {
            let metric = key.parse::<Metric>().map_err(|_| {
                Error::configuration(format!("Unknown metric in classification: {key}"))
            })?;
            layers
                .entry(metric)
                .or_default()
                .push((key != metric.as_str(), entry));
        }

        layers
            .into_iter()
            .map(|(metric, mut entries)| {
                // Stable: aliases keep their key order behind the canonical entry
                entries.sort_by_key(|(alias, _)| *alias);
                entries
                    .into_iter()
                    .fold(ThresholdOverride::default(), |merged, (_, entry)| {
                        merged.overlay(entry)
                    })
                    .complete(metric)
                    .map(|thresholds| (metric, thresholds))
            })
            .collect()
    }

    /// Thresholds configured for `metric`
    pub fn get(&self, metric: Metric) -> Option<ThresholdConfig> {
        self.resolve().ok()?.get(&metric).copied()
    }

    /// Unit settings per configured metric
    pub fn unit_settings(&self) -> Result<BTreeMap<Metric, UnitSettings>> {
        self.resolve()?
            .into_iter()
            .map(|(metric, thresholds)| {
                thresholds
                    .unit_settings()
                    .map(|settings| (metric, settings))
            })
            .collect()
    }
}
