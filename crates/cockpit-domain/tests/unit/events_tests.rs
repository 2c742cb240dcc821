//! Unit tests for metric events

use chrono::Utc;
use cockpit_domain::{
    DatabaseId, Freshness, Metric, MetricEvent, MetricReading, MetricValueState,
};

#[test]
fn test_accessors() {
    let event = MetricEvent::MarkedStale {
        metric: Metric::Latency,
        database: DatabaseId::new("hyrise-3"),
        reason: "timeout".to_string(),
        last_known: Some(12.0),
    };
    assert_eq!(event.metric(), Metric::Latency);
    assert_eq!(event.database().as_str(), "hyrise-3");
}

#[test]
fn test_events_serialize_with_type_tag() {
    let event = MetricEvent::ValueUpdated {
        metric: Metric::Cpu,
        database: DatabaseId::new("hyrise-1"),
        reading: MetricReading {
            value: 42.0,
            state: MetricValueState::Average,
            freshness: Freshness::Fresh,
            updated_at: Utc::now(),
        },
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], "value_updated");
    assert_eq!(json["metric"], "cpu");
    assert_eq!(json["reading"]["state"], "average");

    let back: MetricEvent = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, event);
}
