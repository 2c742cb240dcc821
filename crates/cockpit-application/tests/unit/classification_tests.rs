//! Tests for value classifiers

use cockpit_application::{PassThroughClassifier, ThresholdClassifier};
use cockpit_domain::MetricValueState;
use cockpit_domain::error::Error;
use cockpit_domain::ports::ValueClassifier;

#[test]
fn test_threshold_buckets() {
    let classifier = ThresholdClassifier::new(30.0, 70.0).unwrap();
    assert_eq!(classifier.classify(10.0), MetricValueState::Low);
    assert_eq!(classifier.classify(30.0), MetricValueState::Average);
    assert_eq!(classifier.classify(50.0), MetricValueState::Average);
    assert_eq!(classifier.classify(70.0), MetricValueState::Average);
    assert_eq!(classifier.classify(90.0), MetricValueState::High);
}

#[test]
fn test_inverted_thresholds_swap_low_and_high() {
    let classifier = ThresholdClassifier::new(1_000.0, 10_000.0)
        .unwrap()
        .inverted(true);
    assert_eq!(classifier.classify(500.0), MetricValueState::High);
    assert_eq!(classifier.classify(5_000.0), MetricValueState::Average);
    assert_eq!(classifier.classify(50_000.0), MetricValueState::Low);
}

#[test]
fn test_equal_thresholds_are_allowed() {
    let classifier = ThresholdClassifier::new(5.0, 5.0).unwrap();
    assert_eq!(classifier.classify(5.0), MetricValueState::Average);
    assert_eq!(classifier.classify(4.9), MetricValueState::Low);
}

#[test]
fn test_unordered_thresholds_are_rejected() {
    let err = ThresholdClassifier::new(70.0, 30.0).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_non_finite_thresholds_are_rejected() {
    assert!(ThresholdClassifier::new(f64::NAN, 1.0).is_err());
    assert!(ThresholdClassifier::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn test_pass_through_is_always_average() {
    for value in [-1.0, 0.0, 1e12] {
        assert_eq!(PassThroughClassifier.classify(value), MetricValueState::Average);
    }
}
