//! Monitor response extraction
//!
//! The backend answers in one of two shapes:
//!
//! - snapshot envelope: `{"header": …, "body": {"<key>": {"<db>": payload}}}`
//! - historical list: `[{"id": "<db>", "<key>": [{"timestamp": t, …}, …]}]`
//!
//! The per-database payload is narrowed with the metric's JSON pointer (if
//! any) and turned into sample points.

use crate::constants::{
    CPU_VALUE_POINTER, ENVELOPE_BODY, HISTORIC_ID_FIELD, RAM_VALUE_POINTER, RESPONSE_KEY_ACCESS,
    RESPONSE_KEY_LATENCY, RESPONSE_KEY_QUEUE_LENGTH, RESPONSE_KEY_STORAGE,
    RESPONSE_KEY_SYSTEM_DATA, RESPONSE_KEY_THROUGHPUT, TIMESTAMP_FIELD,
};
use cockpit_domain::error::{Error, Result};
use cockpit_domain::{DatabaseId, Metric, RawSample, SamplePoint};
use serde_json::Value;

/// Key under which the backend reports `metric`
pub fn response_key(metric: Metric) -> &'static str {
    match metric {
        Metric::Access => RESPONSE_KEY_ACCESS,
        Metric::Cpu | Metric::Ram => RESPONSE_KEY_SYSTEM_DATA,
        Metric::Latency => RESPONSE_KEY_LATENCY,
        Metric::QueueLength => RESPONSE_KEY_QUEUE_LENGTH,
        Metric::Storage => RESPONSE_KEY_STORAGE,
        Metric::Throughput => RESPONSE_KEY_THROUGHPUT,
    }
}

/// Pointer selecting the metric's value inside a shared payload
fn value_pointer(metric: Metric) -> Option<&'static str> {
    match metric {
        Metric::Cpu => Some(CPU_VALUE_POINTER),
        Metric::Ram => Some(RAM_VALUE_POINTER),
        _ => None,
    }
}

/// Extract the raw sample of `database` for `metric` from a monitor response
pub fn extract_sample(metric: Metric, database: &DatabaseId, response: &Value) -> Result<RawSample> {
    let key = response_key(metric);
    let payload = match response {
        Value::Object(envelope) => envelope
            .get(ENVELOPE_BODY)
            .and_then(|body| body.get(key))
            .ok_or_else(|| Error::invalid_response(format!("response has no body.{key}")))?
            .get(database.as_str()),
        Value::Array(items) => items
            .iter()
            .find(|item| item.get(HISTORIC_ID_FIELD).and_then(Value::as_str) == Some(database.as_str()))
            .and_then(|item| item.get(key)),
        _ => {
            return Err(Error::invalid_response(format!(
                "unexpected {key} response shape"
            )));
        }
    }
    .ok_or_else(|| Error::invalid_response(format!("no {key} data for {database}")))?;

    Ok(RawSample::from_points(points(metric, payload)))
}

fn points(metric: Metric, payload: &Value) -> Vec<SamplePoint> {
    match payload {
        Value::Array(items) => items.iter().filter_map(|item| point(metric, item)).collect(),
        other => scalar(metric, other).map(SamplePoint::value).into_iter().collect(),
    }
}

fn point(metric: Metric, item: &Value) -> Option<SamplePoint> {
    let value = scalar(metric, item)?;
    Some(match item.get(TIMESTAMP_FIELD).and_then(Value::as_i64) {
        Some(timestamp) => SamplePoint::at(timestamp, value),
        None => SamplePoint::value(value),
    })
}

fn scalar(metric: Metric, value: &Value) -> Option<f64> {
    if let Some(pointer) = value_pointer(metric) {
        return value.pointer(pointer).and_then(Value::as_f64);
    }
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Object(map) => map
            .get(response_key(metric))
            .and_then(Value::as_f64)
            .or_else(|| {
                let leaves: Vec<f64> = map
                    .iter()
                    .filter(|(field, _)| field.as_str() != TIMESTAMP_FIELD)
                    .filter_map(|(_, nested)| leaf_sum(nested))
                    .collect();
                (!leaves.is_empty()).then(|| leaves.iter().sum::<f64>())
            }),
        _ => None,
    }
}

/// Sum of every numeric leaf below `value`; `None` if there is none
fn leaf_sum(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Array(items) => sum_present(items.iter().map(leaf_sum)),
        Value::Object(map) => sum_present(map.values().map(leaf_sum)),
        _ => None,
    }
}

fn sum_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, value| Some(acc.unwrap_or(0.0) + value))
}
