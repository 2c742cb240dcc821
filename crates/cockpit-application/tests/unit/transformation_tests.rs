//! Tests for the transformation unit

use cockpit_application::{
    RefreshTiming, ThresholdClassifier, TransformationUnit, UnitDependencies, UnitSettings,
};
use cockpit_domain::error::Error;
use cockpit_domain::{
    Aggregation, DatabaseId, EntryStatus, FetchParams, Freshness, HistoricRange, Metric,
    MetricEvent, MetricValueState, RawSample, SamplePoint,
};
use cockpit_providers::data_source::InMemoryDataSource;
use cockpit_providers::events::TokioEventBus;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn db(id: &str) -> DatabaseId {
    DatabaseId::new(id)
}

fn settings() -> UnitSettings {
    let classifier = ThresholdClassifier::new(30.0, 70.0).unwrap();
    UnitSettings::new(Arc::new(classifier), Aggregation::Mean)
}

fn unit_with_timing(
    metric: Metric,
    source: &Arc<InMemoryDataSource>,
    timing: RefreshTiming,
) -> Arc<TransformationUnit> {
    let dependencies =
        UnitDependencies::new(Arc::clone(source) as _, TokioEventBus::new_shared()).with_timing(timing);
    Arc::new(TransformationUnit::new(
        metric,
        format!("memory://{}", metric.base()),
        settings(),
        &dependencies,
    ))
}

fn unit(metric: Metric, source: &Arc<InMemoryDataSource>) -> Arc<TransformationUnit> {
    unit_with_timing(metric, source, RefreshTiming::default())
}

fn window(start_ns: i64, end_ns: i64) -> FetchParams {
    FetchParams::new(HistoricRange::new(start_ns, end_ns), Duration::from_secs(1))
}

// ============================================================================
// Registration and Queries
// ============================================================================

#[tokio::test]
async fn test_unregistered_database_is_not_tracked() {
    let source = InMemoryDataSource::new_shared();
    let unit = unit(Metric::Throughput, &source);

    let err = unit.current_value(&db("alpha")).unwrap_err();
    assert!(matches!(err, Error::NotTracked { .. }));
    assert_eq!(unit.status(&db("alpha")), EntryStatus::Unregistered);
}

#[tokio::test]
async fn test_registered_database_has_no_data_yet() {
    let source = InMemoryDataSource::new_shared();
    let unit = unit(Metric::Throughput, &source);

    assert!(unit.register(db("alpha")).await);
    assert!(!unit.register(db("alpha")).await);

    let err = unit.current_value(&db("alpha")).unwrap_err();
    assert!(matches!(err, Error::NoDataYet { .. }));
    assert_eq!(unit.status(&db("alpha")), EntryStatus::Pending);
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_refresh_applies_classified_value() {
    let source = InMemoryDataSource::new_shared();
    source.push_sample(
        Metric::Cpu,
        &db("alpha"),
        RawSample::from_points(vec![SamplePoint::value(80.0), SamplePoint::value(100.0)]),
    );
    let unit = unit(Metric::Cpu, &source);
    unit.register(db("alpha")).await;

    let status = unit.refresh(&db("alpha")).await.unwrap();

    assert_eq!(status, EntryStatus::Fresh);
    let reading = unit.current_value(&db("alpha")).unwrap();
    assert!((reading.value - 90.0).abs() < f64::EPSILON);
    assert_eq!(reading.state, MetricValueState::High);
    assert_eq!(reading.freshness, Freshness::Fresh);
}

#[tokio::test]
async fn test_refresh_requires_registration() {
    let source = InMemoryDataSource::new_shared();
    let unit = unit(Metric::Cpu, &source);

    let err = unit.refresh(&db("alpha")).await.unwrap_err();
    assert!(matches!(err, Error::NotTracked { .. }));
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_fetch_type_mismatch_is_rejected() {
    let source = InMemoryDataSource::new_shared();
    let storage = unit(Metric::Storage, &source);
    let latency = unit(Metric::Latency, &source);
    storage.register(db("alpha")).await;
    latency.register(db("alpha")).await;

    assert!(matches!(
        storage.refresh(&db("alpha")).await,
        Err(Error::UnsupportedFetchType { .. })
    ));
    assert!(matches!(
        latency.fetch_snapshot(&db("alpha"), window(0, 10)).await,
        Err(Error::UnsupportedFetchType { .. })
    ));
}

// ============================================================================
// Freshness
// ============================================================================

#[tokio::test]
async fn test_earlier_cycle_resolving_late_is_dropped() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    let gate = source.push_gated_value(Metric::Throughput, &alpha, 10.0);
    source.push_value(Metric::Throughput, &alpha, 20.0);
    let unit = unit(Metric::Throughput, &source);
    unit.register(alpha.clone()).await;

    let release_after_second = async {
        while unit.current_value(&alpha).is_err() {
            tokio::task::yield_now().await;
        }
        gate.notify_one();
    };
    let (first, second, ()) = tokio::join!(
        unit.refresh(&alpha),
        unit.refresh(&alpha),
        release_after_second
    );

    assert_eq!(first.unwrap(), EntryStatus::Fresh);
    assert_eq!(second.unwrap(), EntryStatus::Fresh);
    let reading = unit.current_value(&alpha).unwrap();
    assert!((reading.value - 20.0).abs() < f64::EPSILON);
    assert_eq!(source.call_count(Metric::Throughput, &alpha), 2);
}

#[tokio::test]
async fn test_in_flight_refresh_keeps_previous_value() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_value(Metric::QueueLength, &alpha, 5.0);
    let gate = source.push_gated_value(Metric::QueueLength, &alpha, 95.0);
    let unit = unit(Metric::QueueLength, &source);
    unit.register(alpha.clone()).await;
    unit.refresh(&alpha).await.unwrap();

    let refreshing = Arc::clone(&unit);
    let target = alpha.clone();
    let handle = tokio::spawn(async move { refreshing.refresh(&target).await });
    tokio::task::yield_now().await;

    assert_eq!(unit.status(&alpha), EntryStatus::Refreshing);
    let reading = unit.current_value(&alpha).unwrap();
    assert_eq!(reading.freshness, Freshness::Refreshing);
    assert!((reading.value - 5.0).abs() < f64::EPSILON);

    gate.notify_one();
    assert_eq!(handle.await.unwrap().unwrap(), EntryStatus::Fresh);
    assert_eq!(
        unit.current_value(&alpha).unwrap().state,
        MetricValueState::High
    );
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failure_keeps_last_value_and_marks_stale() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_value(Metric::Ram, &alpha, 90.0);
    source.push_failure(Metric::Ram, &alpha, "connection refused");
    source.push_value(Metric::Ram, &alpha, 40.0);
    let unit = unit(Metric::Ram, &source);
    unit.register(alpha.clone()).await;

    unit.refresh(&alpha).await.unwrap();
    assert_eq!(unit.refresh(&alpha).await.unwrap(), EntryStatus::Stale);

    let stale = unit.current_value(&alpha).unwrap();
    assert!(stale.is_stale());
    assert!((stale.value - 90.0).abs() < f64::EPSILON);
    assert_eq!(stale.state, MetricValueState::High);

    assert_eq!(unit.refresh(&alpha).await.unwrap(), EntryStatus::Fresh);
    assert_eq!(
        unit.current_value(&alpha).unwrap().state,
        MetricValueState::Average
    );
}

#[tokio::test]
async fn test_failure_without_value_reports_no_data_yet() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_failure(Metric::Latency, &alpha, "500");
    let unit = unit(Metric::Latency, &source);
    unit.register(alpha.clone()).await;

    assert_eq!(unit.refresh(&alpha).await.unwrap(), EntryStatus::Stale);
    assert!(matches!(
        unit.current_value(&alpha),
        Err(Error::NoDataYet { .. })
    ));
}

#[tokio::test]
async fn test_empty_sample_marks_stale() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_sample(Metric::Latency, &alpha, RawSample::default());
    let unit = unit(Metric::Latency, &source);
    unit.register(alpha.clone()).await;

    assert_eq!(unit.refresh(&alpha).await.unwrap(), EntryStatus::Stale);
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_times_out_as_stale() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    let _gate = source.push_gated_value(Metric::Throughput, &alpha, 1.0);
    let timing = RefreshTiming {
        interval: Duration::from_secs(1),
        fetch_timeout: Duration::from_millis(250),
    };
    let unit = unit_with_timing(Metric::Throughput, &source, timing);
    unit.register(alpha.clone()).await;

    assert_eq!(unit.refresh(&alpha).await.unwrap(), EntryStatus::Stale);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_untrack_drops_late_response() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    let gate = source.push_gated_value(Metric::Cpu, &alpha, 50.0);
    let unit = unit(Metric::Cpu, &source);
    unit.register(alpha.clone()).await;

    let refreshing = Arc::clone(&unit);
    let target = alpha.clone();
    let handle = tokio::spawn(async move { refreshing.refresh(&target).await });
    tokio::task::yield_now().await;

    assert!(unit.untrack(&alpha).await);
    gate.notify_one();
    assert_eq!(handle.await.unwrap().unwrap(), EntryStatus::Unregistered);

    unit.register(alpha.clone()).await;
    assert!(matches!(
        unit.current_value(&alpha),
        Err(Error::NoDataYet { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_track_runs_refresh_loop_until_untracked() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.set_value(Metric::Throughput, &alpha, 500.0);
    let unit = unit(Metric::Throughput, &source);

    assert!(unit.track(alpha.clone()).await);
    assert!(!unit.track(alpha.clone()).await);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(unit.status(&alpha), EntryStatus::Fresh);

    tokio::time::sleep(Duration::from_millis(3_000)).await;
    let calls = source.call_count(Metric::Throughput, &alpha);
    assert!(calls >= 4, "expected at least 4 cycles, got {calls}");

    unit.untrack(&alpha).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(source.call_count(Metric::Throughput, &alpha), calls);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_loop_recovers_after_timed_out_cycle() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_value(Metric::Cpu, &alpha, 10.0);
    // Second cycle hangs until the fetch timeout gives up on it
    let _gate = source.push_gated_value(Metric::Cpu, &alpha, 99.0);
    source.set_value(Metric::Cpu, &alpha, 60.0);
    let timing = RefreshTiming {
        interval: Duration::from_secs(1),
        fetch_timeout: Duration::from_millis(400),
    };
    let unit = unit_with_timing(Metric::Cpu, &source, timing);

    unit.track(alpha.clone()).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(unit.status(&alpha), EntryStatus::Fresh);

    // t = 1.5s: the cycle issued at 1s timed out at 1.4s
    tokio::time::sleep(Duration::from_millis(1_490)).await;
    assert_eq!(unit.status(&alpha), EntryStatus::Stale);
    let stale = unit.current_value(&alpha).unwrap();
    assert!(stale.is_stale());
    assert!((stale.value - 10.0).abs() < f64::EPSILON);

    // t = 2.1s: the next cycle fetched again and applied a fresh value
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(unit.status(&alpha), EntryStatus::Fresh);
    let reading = unit.current_value(&alpha).unwrap();
    assert!((reading.value - 60.0).abs() < f64::EPSILON);
    assert_eq!(reading.state, MetricValueState::Average);
    assert!(source.call_count(Metric::Cpu, &alpha) >= 3);

    unit.untrack(&alpha).await;
}

// ============================================================================
// Read Snapshots
// ============================================================================

#[tokio::test]
async fn test_identical_snapshot_fetched_once() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.set_value(Metric::Storage, &alpha, 50.0);
    let unit = unit(Metric::Storage, &source);
    unit.register(alpha.clone()).await;

    assert_eq!(
        unit.fetch_snapshot(&alpha, window(0, 60)).await.unwrap(),
        EntryStatus::Fresh
    );
    unit.fetch_snapshot(&alpha, window(0, 60)).await.unwrap();
    assert_eq!(source.call_count(Metric::Storage, &alpha), 1);

    unit.fetch_snapshot(&alpha, window(60, 120)).await.unwrap();
    assert_eq!(source.call_count(Metric::Storage, &alpha), 2);
}

#[tokio::test]
async fn test_concurrent_identical_snapshots_share_one_fetch() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    let gate = source.push_gated_value(Metric::Access, &alpha, 42.0);
    let unit = unit(Metric::Access, &source);
    unit.register(alpha.clone()).await;

    let release = async {
        tokio::task::yield_now().await;
        gate.notify_one();
    };
    let (first, second, ()) = tokio::join!(
        unit.fetch_snapshot(&alpha, window(0, 60)),
        unit.fetch_snapshot(&alpha, window(0, 60)),
        release
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(source.call_count(Metric::Access, &alpha), 1);
    let reading = unit.current_value(&alpha).unwrap();
    assert!((reading.value - 42.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_untrack_drops_late_snapshot() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    let gate = source.push_gated_value(Metric::Storage, &alpha, 80.0);
    let unit = unit(Metric::Storage, &source);
    let mut events = unit.subscribe().await.unwrap();
    unit.register(alpha.clone()).await;

    let handle = unit.request_snapshot(alpha.clone(), window(0, 60));
    while source.call_count(Metric::Storage, &alpha) == 0 {
        tokio::task::yield_now().await;
    }

    assert!(unit.untrack(&alpha).await);
    gate.notify_one();
    assert_eq!(handle.await.unwrap().unwrap(), EntryStatus::Unregistered);

    unit.register(alpha.clone()).await;
    assert!(matches!(
        unit.current_value(&alpha),
        Err(Error::NoDataYet { .. })
    ));
    assert!(matches!(events.next().await, Some(MetricEvent::Tracked { .. })));
    assert!(matches!(events.next().await, Some(MetricEvent::Untracked { .. })));
    assert!(matches!(events.next().await, Some(MetricEvent::Tracked { .. })));

    // The abandoned retrieval left nothing in the snapshot cache
    source.set_value(Metric::Storage, &alpha, 30.0);
    assert_eq!(
        unit.fetch_snapshot(&alpha, window(0, 60)).await.unwrap(),
        EntryStatus::Fresh
    );
    assert_eq!(source.call_count(Metric::Storage, &alpha), 2);
    let reading = unit.current_value(&alpha).unwrap();
    assert!((reading.value - 30.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_failed_snapshot_is_not_cached() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_failure(Metric::Storage, &alpha, "backend restarting");
    source.push_value(Metric::Storage, &alpha, 75.0);
    let unit = unit(Metric::Storage, &source);
    unit.register(alpha.clone()).await;

    assert_eq!(
        unit.fetch_snapshot(&alpha, window(0, 60)).await.unwrap(),
        EntryStatus::Stale
    );
    assert_eq!(
        unit.fetch_snapshot(&alpha, window(0, 60)).await.unwrap(),
        EntryStatus::Fresh
    );
    assert_eq!(source.call_count(Metric::Storage, &alpha), 2);
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_events_follow_state_transitions() {
    let source = InMemoryDataSource::new_shared();
    let alpha = db("alpha");
    source.push_value(Metric::Cpu, &alpha, 10.0);
    source.push_failure(Metric::Cpu, &alpha, "timeout");
    let unit = unit(Metric::Cpu, &source);
    let mut events = unit.subscribe().await.unwrap();

    unit.register(alpha.clone()).await;
    unit.refresh(&alpha).await.unwrap();
    unit.refresh(&alpha).await.unwrap();
    unit.untrack(&alpha).await;

    assert!(matches!(
        events.next().await,
        Some(MetricEvent::Tracked { metric: Metric::Cpu, .. })
    ));
    match events.next().await {
        Some(MetricEvent::ValueUpdated { reading, .. }) => {
            assert_eq!(reading.state, MetricValueState::Low);
        }
        other => panic!("expected ValueUpdated, got {other:?}"),
    }
    match events.next().await {
        Some(MetricEvent::MarkedStale { last_known, .. }) => {
            assert_eq!(last_known, Some(10.0));
        }
        other => panic!("expected MarkedStale, got {other:?}"),
    }
    assert!(matches!(
        events.next().await,
        Some(MetricEvent::Untracked { .. })
    ));
}
