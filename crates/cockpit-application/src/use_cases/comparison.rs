//! Selection / Comparison Use Case
//!
//! Tracks which databases and metrics are selected, keeps the transformation
//! units registered accordingly, and ranks databases per metric.
//!
//! Selection changes drive the units: selecting a database registers it with
//! every selected metric's unit, deselecting cancels its fetches and refresh
//! loops. `read` metrics are fetched for the current historic window; moving
//! the window re-requests them.

use crate::domain_services::ranking::{RankedDatabase, rank_readings};
use crate::registry::MetricRegistry;
use arc_swap::ArcSwap;
use cockpit_domain::error::Error;
use cockpit_domain::{
    DatabaseId, EntryStatus, FetchParams, FetchType, Metric, MetricValueStateOrder,
};
use dashmap::DashSet;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Why a database is missing from, or degraded in, a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompleteReason {
    /// The unit has no registration for the database
    NotTracked,
    /// No fetch has completed yet
    NoDataYet,
    /// The latest fetch failed; a last-known value may still be ranked
    Stale,
}

/// Database reported next to a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteDatabase {
    /// Affected database
    pub database: DatabaseId,
    /// What is missing
    pub reason: IncompleteReason,
}

/// Ranking of the selected databases for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Ranked metric
    pub metric: Metric,
    /// Direction used
    pub order: MetricValueStateOrder,
    /// Databases with a value, in rank order; stale rows are flagged
    pub ranked: Vec<RankedDatabase>,
    /// Databases without a fresh value
    pub incomplete: Vec<IncompleteDatabase>,
}

impl Ranking {
    /// Databases in rank order
    pub fn databases(&self) -> Vec<&DatabaseId> {
        self.ranked.iter().map(|row| &row.database).collect()
    }

    /// Whether every selected database has a fresh value
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }
}

/// Selected databases and metrics, and rankings over them
pub struct ComparisonService {
    registry: Arc<MetricRegistry>,
    databases: DashSet<DatabaseId>,
    metrics: DashSet<Metric>,
    window: ArcSwap<FetchParams>,
}

impl ComparisonService {
    /// Create a service with nothing selected and `window` as historic window
    pub fn new(registry: Arc<MetricRegistry>, window: FetchParams) -> Self {
        Self {
            registry,
            databases: DashSet::new(),
            metrics: DashSet::new(),
            window: ArcSwap::from_pointee(window),
        }
    }

    /// Registry the service reads from
    pub fn registry(&self) -> &Arc<MetricRegistry> {
        &self.registry
    }

    /// Selected databases, sorted
    pub fn selected_databases(&self) -> Vec<DatabaseId> {
        let mut databases: Vec<DatabaseId> =
            self.databases.iter().map(|db| db.key().clone()).collect();
        databases.sort();
        databases
    }

    /// Selected metrics, in [`Metric::ALL`] order
    pub fn selected_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|metric| self.metrics.contains(metric))
            .collect()
    }

    /// Current historic window for `read` metrics
    pub fn historic_window(&self) -> FetchParams {
        **self.window.load()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select `database` for every selected metric
    pub async fn select_database(&self, database: DatabaseId) {
        if !self.databases.insert(database.clone()) {
            return;
        }
        info!(database = %database, "Database selected");
        for metric in self.selected_metrics() {
            self.attach(metric, &database).await;
        }
    }

    /// Deselect `database`, cancelling its fetches for every metric
    pub async fn deselect_database(&self, database: &DatabaseId) {
        if self.databases.remove(database).is_none() {
            return;
        }
        info!(database = %database, "Database deselected");
        for metadata in self.registry.iter() {
            metadata.transformation_service.untrack(database).await;
        }
    }

    /// Select `metric` for every selected database
    pub async fn select_metric(&self, metric: Metric) {
        if !self.metrics.insert(metric) {
            return;
        }
        info!(metric = %metric, "Metric selected");
        for database in self.selected_databases() {
            self.attach(metric, &database).await;
        }
    }

    /// Deselect `metric`, tearing down its refresh loops
    pub async fn deselect_metric(&self, metric: Metric) {
        if self.metrics.remove(&metric).is_none() {
            return;
        }
        info!(metric = %metric, "Metric deselected");
        self.registry.unit(metric).untrack_all().await;
    }

    /// Move the historic window and re-request every selected `read` metric
    ///
    /// Requests for parameters already fetched are served from the unit's
    /// snapshot cache.
    pub fn set_historic_window(&self, window: FetchParams) {
        self.window.store(Arc::new(window));
        for metric in self.selected_metrics() {
            if metric.fetch_type() != FetchType::Read {
                continue;
            }
            let unit = self.registry.unit(metric);
            for database in self.selected_databases() {
                drop(unit.request_snapshot(database, window));
            }
        }
    }

    async fn attach(&self, metric: Metric, database: &DatabaseId) {
        let unit = self.registry.unit(metric);
        unit.track(database.clone()).await;
        if metric.fetch_type() == FetchType::Read {
            drop(unit.request_snapshot(database.clone(), self.historic_window()));
        }
    }

    // ========================================================================
    // Ranking
    // ========================================================================

    /// Rank the selected databases by `metric`
    ///
    /// Stale databases keep their last-known value in the ranking and are
    /// also listed as incomplete; databases without any value are only
    /// listed as incomplete.
    pub fn rank_databases(&self, metric: Metric, order: MetricValueStateOrder) -> Ranking {
        let unit = self.registry.unit(metric);
        let mut readings = Vec::new();
        let mut incomplete = Vec::new();

        for database in self.selected_databases() {
            match unit.current_value(&database) {
                Ok(reading) => {
                    if reading.is_stale() {
                        incomplete.push(IncompleteDatabase {
                            database: database.clone(),
                            reason: IncompleteReason::Stale,
                        });
                    }
                    readings.push((database, reading));
                }
                Err(Error::NotTracked { .. }) => incomplete.push(IncompleteDatabase {
                    database,
                    reason: IncompleteReason::NotTracked,
                }),
                Err(_) => {
                    let reason = if unit.status(&database) == EntryStatus::Stale {
                        IncompleteReason::Stale
                    } else {
                        IncompleteReason::NoDataYet
                    };
                    incomplete.push(IncompleteDatabase { database, reason });
                }
            }
        }

        let ranked = rank_readings(order, readings);
        debug!(
            metric = %metric,
            order = %order,
            ranked = ranked.len(),
            incomplete = incomplete.len(),
            "Ranked databases"
        );
        Ranking {
            metric,
            order,
            ranked,
            incomplete,
        }
    }

    /// Rank every selected metric independently
    pub fn rank_selected(&self, order: MetricValueStateOrder) -> Vec<Ranking> {
        self.selected_metrics()
            .into_iter()
            .map(|metric| self.rank_databases(metric, order))
            .collect()
    }

    /// Deselect everything and stop all refresh loops
    pub async fn clear(&self) {
        for database in self.selected_databases() {
            self.deselect_database(&database).await;
        }
        self.metrics.clear();
    }
}

impl std::fmt::Debug for ComparisonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonService")
            .field("databases", &self.selected_databases())
            .field("metrics", &self.selected_metrics())
            .field("window", &self.historic_window())
            .finish_non_exhaustive()
    }
}
