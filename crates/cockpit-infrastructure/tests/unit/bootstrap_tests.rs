//! Composition root tests

use cockpit_domain::{DatabaseId, Metric, MetricEvent, MetricValueState, MetricValueStateOrder};
use cockpit_infrastructure::bootstrap::{CockpitContext, create_event_bus};
use cockpit_infrastructure::config::{
    AppConfig, ClassificationConfig, EventBusConfig, ThresholdConfig,
};
use cockpit_providers::data_source::InMemoryDataSource;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

fn db(id: &str) -> DatabaseId {
    DatabaseId::new(id)
}

#[tokio::test]
async fn test_registry_uses_configured_backend() {
    let mut config = AppConfig::default();
    config.backend.url = "http://monitor.example/".to_string();

    let context = CockpitContext::from_config(config).unwrap();

    let registry = context.registry();
    assert_eq!(registry.backend_url(), "http://monitor.example/");
    assert_eq!(
        registry.get_metadata(Metric::Throughput).endpoint,
        "http://monitor.example/throughput"
    );
    assert_eq!(
        registry.unit(Metric::Cpu).timing().interval,
        Duration::from_secs(1)
    );
}

#[test]
fn test_invalid_thresholds_fail_wiring() {
    let mut config = AppConfig::default();
    config.classification =
        ClassificationConfig::empty().with(Metric::Cpu, ThresholdConfig::new(80.0, 20.0));

    let result = CockpitContext::with_data_source(config, InMemoryDataSource::new_shared());

    assert!(result.is_err());
}

#[test]
fn test_null_event_bus_has_no_subscribers() {
    let bus = create_event_bus(&EventBusConfig::null());
    assert!(!bus.has_subscribers());
}

#[tokio::test(start_paused = true)]
async fn test_context_ranks_with_configured_thresholds() {
    let source = InMemoryDataSource::new_shared();
    source.set_value(Metric::Cpu, &db("A"), 95.0);
    source.set_value(Metric::Cpu, &db("B"), 5.0);
    let mut config = AppConfig::default();
    config.refresh.interval_ms = 3_600_000;
    let context = CockpitContext::with_data_source(config, Arc::clone(&source) as _).unwrap();

    let comparison = context.comparison();
    comparison.select_database(db("A")).await;
    comparison.select_database(db("B")).await;
    comparison.select_metric(Metric::Cpu).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    let ranking = comparison.rank_databases(Metric::Cpu, MetricValueStateOrder::Desc);
    assert_eq!(ranking.databases(), [&db("A"), &db("B")]);
    assert_eq!(ranking.ranked[0].state, MetricValueState::High);
    assert_eq!(ranking.ranked[1].state, MetricValueState::Low);

    context.shutdown().await;
    assert!(!context.registry().unit(Metric::Cpu).is_tracked(&db("A")));
}

#[tokio::test(start_paused = true)]
async fn test_context_publishes_on_configured_bus() {
    let source = InMemoryDataSource::new_shared();
    source.set_value(Metric::Ram, &db("A"), 50.0);
    let context = CockpitContext::with_data_source(AppConfig::default(), source).unwrap();
    let mut events = context.event_bus().subscribe_events().await.unwrap();

    context.comparison().select_database(db("A")).await;
    context.comparison().select_metric(Metric::Ram).await;

    let first = events.next().await.unwrap();
    assert!(matches!(first, MetricEvent::Tracked { metric: Metric::Ram, .. }));
    context.shutdown().await;
}
