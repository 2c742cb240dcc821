//! Metric Registry
//!
//! Static metadata per metric plus the one transformation unit that serves
//! it. Built once at startup and never mutated afterwards; lookups are pure
//! and infallible because every key is a closed enum.
//!
//! ## Example
//!
//! ```ignore
//! use cockpit_application::registry::MetricRegistry;
//! use cockpit_domain::Metric;
//!
//! let registry = MetricRegistry::builder("http://localhost:8000/monitor/", dependencies).build();
//! let cpu = registry.get_metadata(Metric::Cpu);
//! assert_eq!(cpu.endpoint, "http://localhost:8000/monitor/system_data");
//! ```

use crate::use_cases::transformation::{TransformationUnit, UnitDependencies, UnitSettings};
use cockpit_domain::{FetchType, Metric, MetricValueState, MetricValueStateOrder};
use std::collections::HashMap;
use std::sync::Arc;

/// Display title of `metric`
pub fn get_metric_title(metric: Metric) -> &'static str {
    metric.title()
}

/// UI building block that renders `metric`
pub fn get_metric_component(metric: Metric) -> &'static str {
    metric.component()
}

/// Tile color of `state`
pub fn get_metric_detail_color(state: MetricValueState) -> &'static str {
    state.color()
}

/// States in `order`, as a fresh caller-owned array
pub fn get_metric_value_state_order(order: MetricValueStateOrder) -> [MetricValueState; 3] {
    order.states()
}

/// Attributes of one metric
#[derive(Debug, Clone)]
pub struct MetricMetadata {
    /// Metric identity
    pub metric: Metric,
    /// Fetch strategy
    pub fetch_type: FetchType,
    /// Logical backend resource
    pub base: &'static str,
    /// Backend root concatenated with `base`
    pub endpoint: String,
    /// Unit serving the metric
    pub transformation_service: Arc<TransformationUnit>,
}

/// Lookup table from metric identity to metadata
#[derive(Debug)]
pub struct MetricRegistry {
    backend_url: String,
    entries: [MetricMetadata; 7],
}

impl MetricRegistry {
    /// Start building a registry against `backend_url`
    pub fn builder(
        backend_url: impl Into<String>,
        dependencies: UnitDependencies,
    ) -> MetricRegistryBuilder {
        MetricRegistryBuilder {
            backend_url: backend_url.into(),
            dependencies,
            settings: HashMap::new(),
        }
    }

    /// Backend root every endpoint is derived from
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Metadata of `metric`
    pub fn get_metadata(&self, metric: Metric) -> &MetricMetadata {
        &self.entries[metric.index()]
    }

    /// Unit serving `metric`
    pub fn unit(&self, metric: Metric) -> &Arc<TransformationUnit> {
        &self.get_metadata(metric).transformation_service
    }

    /// Display title of `metric`
    pub fn get_metric_title(&self, metric: Metric) -> &'static str {
        get_metric_title(metric)
    }

    /// UI building block that renders `metric`
    pub fn get_metric_component(&self, metric: Metric) -> &'static str {
        get_metric_component(metric)
    }

    /// Tile color of `state`
    pub fn get_metric_detail_color(&self, state: MetricValueState) -> &'static str {
        get_metric_detail_color(state)
    }

    /// States in `order`
    pub fn get_metric_value_state_order(
        &self,
        order: MetricValueStateOrder,
    ) -> [MetricValueState; 3] {
        get_metric_value_state_order(order)
    }

    /// All metadata entries in [`Metric::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &MetricMetadata> {
        self.entries.iter()
    }

    /// Stop every unit's refresh loops and drop all registrations
    pub async fn shutdown(&self) {
        for metadata in &self.entries {
            metadata.transformation_service.untrack_all().await;
        }
    }
}

/// Builder for [`MetricRegistry`]
pub struct MetricRegistryBuilder {
    backend_url: String,
    dependencies: UnitDependencies,
    settings: HashMap<Metric, UnitSettings>,
}

impl MetricRegistryBuilder {
    /// Set the classifier and aggregation of `metric`
    ///
    /// Metrics without settings use [`UnitSettings::default`].
    #[must_use]
    pub fn with_settings(mut self, metric: Metric, settings: UnitSettings) -> Self {
        self.settings.insert(metric, settings);
        self
    }

    /// Build the registry, creating one unit per metric
    pub fn build(mut self) -> MetricRegistry {
        let backend_url = self.backend_url;
        let dependencies = self.dependencies;
        let entries = Metric::ALL.map(|metric| {
            let endpoint = format!("{backend_url}{}", metric.base());
            let settings = self.settings.remove(&metric).unwrap_or_default();
            let unit = TransformationUnit::new(metric, endpoint.clone(), settings, &dependencies);
            MetricMetadata {
                metric,
                fetch_type: metric.fetch_type(),
                base: metric.base(),
                endpoint,
                transformation_service: Arc::new(unit),
            }
        });
        MetricRegistry {
            backend_url,
            entries,
        }
    }
}
