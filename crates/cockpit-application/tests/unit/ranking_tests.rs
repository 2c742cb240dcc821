//! Tests for state-grouped ranking

use chrono::Utc;
use cockpit_application::rank_readings;
use cockpit_domain::{
    DatabaseId, Freshness, MetricReading, MetricValueState, MetricValueStateOrder,
};

fn reading(value: f64, state: MetricValueState) -> MetricReading {
    MetricReading {
        value,
        state,
        freshness: Freshness::Fresh,
        updated_at: Utc::now(),
    }
}

fn ids(order: MetricValueStateOrder, readings: Vec<(&str, MetricReading)>) -> Vec<String> {
    rank_readings(
        order,
        readings
            .into_iter()
            .map(|(id, reading)| (DatabaseId::new(id), reading)),
    )
    .into_iter()
    .map(|row| row.database.to_string())
    .collect()
}

fn abc() -> Vec<(&'static str, MetricReading)> {
    vec![
        ("A", reading(10.0, MetricValueState::Low)),
        ("B", reading(50.0, MetricValueState::Average)),
        ("C", reading(90.0, MetricValueState::High)),
    ]
}

#[test]
fn test_desc_ranks_high_first() {
    assert_eq!(ids(MetricValueStateOrder::Desc, abc()), ["C", "B", "A"]);
}

#[test]
fn test_asc_ranks_low_first() {
    assert_eq!(ids(MetricValueStateOrder::Asc, abc()), ["A", "B", "C"]);
}

#[test]
fn test_value_breaks_ties_within_state() {
    let readings = || {
        vec![
            ("B", reading(50.0, MetricValueState::Average)),
            ("D", reading(40.0, MetricValueState::Average)),
        ]
    };
    assert_eq!(ids(MetricValueStateOrder::Asc, readings()), ["D", "B"]);
    assert_eq!(ids(MetricValueStateOrder::Desc, readings()), ["B", "D"]);
}

#[test]
fn test_state_dominates_value() {
    // An inverted classifier can label a small value High
    let readings = vec![
        ("big", reading(900.0, MetricValueState::Low)),
        ("small", reading(1.0, MetricValueState::High)),
    ];
    assert_eq!(ids(MetricValueStateOrder::Desc, readings), ["small", "big"]);
}

#[test]
fn test_equal_values_fall_back_to_database_id() {
    let readings = vec![
        ("zeta", reading(5.0, MetricValueState::Average)),
        ("alpha", reading(5.0, MetricValueState::Average)),
    ];
    assert_eq!(ids(MetricValueStateOrder::Desc, readings), ["alpha", "zeta"]);
}

#[test]
fn test_stale_flag_is_carried() {
    let mut stale = reading(90.0, MetricValueState::High);
    stale.freshness = Freshness::Stale;
    let ranked = rank_readings(
        MetricValueStateOrder::Desc,
        vec![(DatabaseId::new("C"), stale)],
    );
    assert!(ranked[0].stale);
}

#[test]
fn test_empty_input_yields_empty_ranking() {
    assert!(rank_readings(MetricValueStateOrder::Asc, Vec::new()).is_empty());
}
