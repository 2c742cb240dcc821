//! State-grouped ranking
//!
//! Groups follow [`MetricValueStateOrder::states`]; the numeric value only
//! breaks ties inside a group and never moves an entry across groups.

use cockpit_domain::{DatabaseId, MetricReading, MetricValueState, MetricValueStateOrder};
use serde::Serialize;
use std::cmp::Ordering;

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDatabase {
    /// Ranked database
    pub database: DatabaseId,
    /// Representative value
    pub value: f64,
    /// Classified state of `value`
    pub state: MetricValueState,
    /// Value is last-known-good; the latest fetch failed
    pub stale: bool,
}

/// Order readings by state group, then by value in the same direction
///
/// Equal values fall back to the database id so output is deterministic.
pub fn rank_readings<I>(order: MetricValueStateOrder, readings: I) -> Vec<RankedDatabase>
where
    I: IntoIterator<Item = (DatabaseId, MetricReading)>,
{
    let mut ranked: Vec<RankedDatabase> = readings
        .into_iter()
        .map(|(database, reading)| RankedDatabase {
            stale: reading.is_stale(),
            database,
            value: reading.value,
            state: reading.state,
        })
        .collect();
    ranked.sort_by(|a, b| compare(order, a, b));
    ranked
}

fn compare(order: MetricValueStateOrder, a: &RankedDatabase, b: &RankedDatabase) -> Ordering {
    order
        .position(a.state)
        .cmp(&order.position(b.state))
        .then_with(|| match order {
            MetricValueStateOrder::Asc => a.value.total_cmp(&b.value),
            MetricValueStateOrder::Desc => b.value.total_cmp(&a.value),
        })
        .then_with(|| a.database.cmp(&b.database))
}
