//! Composition root
//!
//! Wires a data source and an event bus into a metric registry and a
//! comparison service according to [`AppConfig`].
//!
//! ```text
//! AppConfig → data source + event bus → UnitDependencies → MetricRegistry
//!                                                              ↓
//!                                                     ComparisonService
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = CockpitContext::from_config(config)?;
//! context.comparison().select_metric(Metric::Cpu).await;
//! ```

use crate::config::{AppConfig, EventBusConfig, EventBusProvider};
use cockpit_application::{ComparisonService, MetricRegistry, UnitDependencies};
use cockpit_domain::error::Result;
use cockpit_domain::ports::{MetricDataSource, MetricEventBus};
use cockpit_providers::data_source::HttpMetricDataSource;
use cockpit_providers::events::{NullEventBus, TokioEventBus};
use cockpit_providers::http::{HttpClientConfig, build_client};
use std::sync::Arc;
use tracing::info;

/// Wired application services
pub struct CockpitContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    registry: Arc<MetricRegistry>,
    comparison: Arc<ComparisonService>,
    event_bus: Arc<dyn MetricEventBus>,
}

impl CockpitContext {
    /// Context fetching from the configured backend over HTTP
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let mut client_config = HttpClientConfig::with_timeout(config.backend.request_timeout());
        if let Some(user_agent) = &config.backend.user_agent {
            client_config = client_config.with_user_agent(user_agent.clone());
        }
        let client = build_client(&client_config)?;
        let data_source = Arc::new(HttpMetricDataSource::new(
            client,
            config.backend.request_timeout(),
        ));
        Self::with_data_source(config, data_source)
    }

    /// Context over an arbitrary data source
    pub fn with_data_source(
        config: AppConfig,
        data_source: Arc<dyn MetricDataSource>,
    ) -> Result<Self> {
        let event_bus = create_event_bus(&config.event_bus);
        let settings = config.classification.unit_settings()?;

        let mut dependencies =
            UnitDependencies::new(Arc::clone(&data_source), Arc::clone(&event_bus))
                .with_timing(config.refresh.timing());
        dependencies.snapshot_capacity = config.refresh.snapshot_capacity;

        let mut builder = MetricRegistry::builder(config.backend.url.clone(), dependencies);
        for (metric, unit_settings) in settings {
            builder = builder.with_settings(metric, unit_settings);
        }
        let registry = Arc::new(builder.build());
        let comparison = Arc::new(ComparisonService::new(
            Arc::clone(&registry),
            config.history.window(),
        ));

        info!(
            backend = %config.backend.url,
            data_source = data_source.provider_name(),
            interval_ms = config.refresh.interval_ms,
            "Cockpit context initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            comparison,
            event_bus,
        })
    }

    /// Metric registry
    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.registry)
    }

    /// Selection and ranking service
    pub fn comparison(&self) -> Arc<ComparisonService> {
        Arc::clone(&self.comparison)
    }

    /// Event bus every unit publishes to
    pub fn event_bus(&self) -> Arc<dyn MetricEventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Drop all selections and stop every refresh loop
    pub async fn shutdown(&self) {
        self.comparison.clear().await;
        self.registry.shutdown().await;
        info!("Cockpit context shut down");
    }
}

impl std::fmt::Debug for CockpitContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CockpitContext")
            .field("backend", &self.registry.backend_url())
            .field("comparison", &self.comparison)
            .finish_non_exhaustive()
    }
}

/// Event bus selected by configuration
pub fn create_event_bus(config: &EventBusConfig) -> Arc<dyn MetricEventBus> {
    match config.provider {
        EventBusProvider::Tokio => Arc::new(TokioEventBus::with_capacity(config.capacity)),
        EventBusProvider::Null => Arc::new(NullEventBus::new()),
    }
}
