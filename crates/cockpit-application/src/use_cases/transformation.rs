//! Transformation Unit Use Case
//!
//! One unit per metric. A unit fetches raw samples for every database
//! registered with it, reduces them to one value, classifies that value and
//! caches the result per database.
//!
//! ## Fetch semantics
//!
//! | Fetch type | Trigger | Caching |
//! |------------|---------|---------|
//! | `read` | [`TransformationUnit::fetch_snapshot`] | one retrieval per (database, params), concurrent duplicates coalesce |
//! | `modify` | refresh loop started by [`TransformationUnit::track`] | latest response wins |
//!
//! ## Ordering
//!
//! Every fetch issued for a database gets a sequence number. A response is
//! applied only if no later-issued response has been applied already, so a
//! slow older response never overwrites a newer value. Responses belonging
//! to a cancelled registration are dropped.
//!
//! Transport failures never leave the unit: they mark the entry `Stale`,
//! keep the last good value, and publish a `MarkedStale` event.

use crate::domain_services::PassThroughClassifier;
use chrono::{DateTime, Utc};
use cockpit_domain::error::{Error, Result};
use cockpit_domain::ports::{MetricDataSource, MetricEventBus, MetricEventStream, ValueClassifier};
use cockpit_domain::{
    Aggregation, DatabaseId, EntryStatus, FetchParams, FetchRequest, FetchType, Freshness, Metric,
    MetricEvent, MetricReading, MetricValueState,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::StreamExt;
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default refresh interval for `modify` metrics
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Default bound on a single fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Default number of cached `read` snapshots per unit
pub const DEFAULT_SNAPSHOT_CAPACITY: u64 = 4096;

/// Refresh cadence and fetch bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTiming {
    /// Period of the `modify` refresh loop
    pub interval: Duration,
    /// A fetch exceeding this bound counts as failed
    pub fetch_timeout: Duration,
}

impl Default for RefreshTiming {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Metric-specific processing rules
#[derive(Clone)]
pub struct UnitSettings {
    /// Numeric-to-state classification
    pub classifier: Arc<dyn ValueClassifier>,
    /// Sample reduction
    pub aggregation: Aggregation,
}

impl UnitSettings {
    /// Settings from a classifier and an aggregation
    pub fn new(classifier: Arc<dyn ValueClassifier>, aggregation: Aggregation) -> Self {
        Self {
            classifier,
            aggregation,
        }
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self::new(Arc::new(PassThroughClassifier), Aggregation::default())
    }
}

/// Collaborators shared by every unit of a registry
#[derive(Clone)]
pub struct UnitDependencies {
    /// Backend sample retrieval
    pub data_source: Arc<dyn MetricDataSource>,
    /// Event publication
    pub event_bus: Arc<dyn MetricEventBus>,
    /// Refresh cadence and fetch bound
    pub timing: RefreshTiming,
    /// Maximum cached `read` snapshots per unit
    pub snapshot_capacity: u64,
}

impl UnitDependencies {
    /// Dependencies with default timing and capacity
    pub fn new(data_source: Arc<dyn MetricDataSource>, event_bus: Arc<dyn MetricEventBus>) -> Self {
        Self {
            data_source,
            event_bus,
            timing: RefreshTiming::default(),
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
        }
    }

    /// Override the refresh timing
    #[must_use]
    pub fn with_timing(mut self, timing: RefreshTiming) -> Self {
        self.timing = timing;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Classified {
    value: f64,
    state: MetricValueState,
    updated_at: DateTime<Utc>,
}

struct TrackedEntry {
    epoch: u64,
    cancel: CancellationToken,
    status: EntryStatus,
    latest: Option<Classified>,
    issued_seq: u64,
    applied_seq: u64,
    polling: bool,
}

impl TrackedEntry {
    fn new(epoch: u64) -> Self {
        Self {
            epoch,
            cancel: CancellationToken::new(),
            status: EntryStatus::Pending,
            latest: None,
            issued_seq: 0,
            applied_seq: 0,
            polling: false,
        }
    }

    fn reading(&self) -> Option<MetricReading> {
        let freshness = match self.status {
            EntryStatus::Refreshing => Freshness::Refreshing,
            EntryStatus::Stale => Freshness::Stale,
            EntryStatus::Unregistered | EntryStatus::Pending | EntryStatus::Fresh => {
                Freshness::Fresh
            }
        };
        self.latest.map(|latest| MetricReading {
            value: latest.value,
            state: latest.state,
            freshness,
            updated_at: latest.updated_at,
        })
    }
}

/// Issued fetch, tied to one registration of one database
struct FetchTicket {
    database: DatabaseId,
    epoch: u64,
    seq: u64,
    cancel: CancellationToken,
}

/// Fetches, classifies and caches one metric across databases
pub struct TransformationUnit {
    metric: Metric,
    endpoint: String,
    settings: UnitSettings,
    data_source: Arc<dyn MetricDataSource>,
    event_bus: Arc<dyn MetricEventBus>,
    timing: RefreshTiming,
    entries: DashMap<DatabaseId, TrackedEntry>,
    snapshots: Cache<(DatabaseId, FetchParams), f64>,
    epochs: AtomicU64,
}

impl TransformationUnit {
    /// Create a unit for `metric` fetching from `endpoint`
    pub fn new(
        metric: Metric,
        endpoint: impl Into<String>,
        settings: UnitSettings,
        dependencies: &UnitDependencies,
    ) -> Self {
        Self {
            metric,
            endpoint: endpoint.into(),
            settings,
            data_source: Arc::clone(&dependencies.data_source),
            event_bus: Arc::clone(&dependencies.event_bus),
            timing: dependencies.timing,
            entries: DashMap::new(),
            snapshots: Cache::builder()
                .max_capacity(dependencies.snapshot_capacity)
                .build(),
            epochs: AtomicU64::new(0),
        }
    }

    /// Metric handled by the unit
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Backend locator the unit fetches from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch strategy of the unit's metric
    pub fn fetch_type(&self) -> FetchType {
        self.metric.fetch_type()
    }

    /// Refresh cadence and fetch bound
    pub fn timing(&self) -> RefreshTiming {
        self.timing
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register `database` without issuing any fetch
    ///
    /// Returns `false` if the database was already registered.
    pub async fn register(&self, database: DatabaseId) -> bool {
        let registered = match self.entries.entry(database.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(TrackedEntry::new(epoch));
                true
            }
        };
        if registered {
            info!(metric = %self.metric, database = %database, "Tracking database");
            self.publish(MetricEvent::Tracked {
                metric: self.metric,
                database,
            })
            .await;
        }
        registered
    }

    /// Register `database` and, for `modify` metrics, start its refresh loop
    ///
    /// The first refresh is issued immediately. Tracking an already tracked
    /// database is a no-op.
    pub async fn track(self: &Arc<Self>, database: DatabaseId) -> bool {
        let registered = self.register(database.clone()).await;
        if self.fetch_type() == FetchType::Modify {
            self.start_refresh_loop(&database);
        }
        registered
    }

    /// Unregister `database`, cancel its fetches and stop its refresh loop
    ///
    /// Responses still in flight are dropped when they arrive.
    pub async fn untrack(&self, database: &DatabaseId) -> bool {
        let Some((_, entry)) = self.entries.remove(database) else {
            return false;
        };
        entry.cancel.cancel();
        info!(metric = %self.metric, database = %database, "Stopped tracking database");
        self.publish(MetricEvent::Untracked {
            metric: self.metric,
            database: database.clone(),
        })
        .await;
        true
    }

    /// Unregister every database
    pub async fn untrack_all(&self) {
        for database in self.tracked_databases() {
            self.untrack(&database).await;
        }
    }

    /// Registered databases, sorted
    pub fn tracked_databases(&self) -> Vec<DatabaseId> {
        let mut databases: Vec<DatabaseId> =
            self.entries.iter().map(|entry| entry.key().clone()).collect();
        databases.sort();
        databases
    }

    /// Whether `database` is registered
    pub fn is_tracked(&self, database: &DatabaseId) -> bool {
        self.entries.contains_key(database)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Latest classified reading of `database`
    ///
    /// Never blocks on a fetch. A stale reading is returned with
    /// [`Freshness::Stale`] rather than as an error.
    pub fn current_value(&self, database: &DatabaseId) -> Result<MetricReading> {
        let entry = self
            .entries
            .get(database)
            .ok_or_else(|| Error::not_tracked(self.metric, database))?;
        entry
            .reading()
            .ok_or_else(|| Error::no_data_yet(self.metric, database))
    }

    /// Lifecycle state of `database`
    pub fn status(&self, database: &DatabaseId) -> EntryStatus {
        self.entries
            .get(database)
            .map_or(EntryStatus::Unregistered, |entry| entry.status)
    }

    /// Subscribe to this unit's events
    pub async fn subscribe(&self) -> Result<MetricEventStream> {
        let metric = self.metric;
        let events = self.event_bus.subscribe_events().await?;
        Ok(Box::pin(events.filter(move |event| {
            futures::future::ready(event.metric() == metric)
        })))
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Run one `modify` refresh cycle for `database` and wait for it
    ///
    /// Returns the entry status after the response was applied or dropped.
    pub async fn refresh(&self, database: &DatabaseId) -> Result<EntryStatus> {
        if self.fetch_type() != FetchType::Modify {
            return Err(Error::unsupported_fetch_type(self.metric, "refresh"));
        }
        let ticket = self
            .issue(database, None)
            .ok_or_else(|| Error::not_tracked(self.metric, database))?;
        self.run_refresh(ticket).await;
        Ok(self.status(database))
    }

    /// Fetch the `read` snapshot of `database` for `params` and wait for it
    ///
    /// A snapshot already retrieved for the same parameters is served from
    /// cache; concurrent requests for the same parameters share one
    /// retrieval. Returns the entry status after the result was applied.
    pub async fn fetch_snapshot(
        &self,
        database: &DatabaseId,
        params: FetchParams,
    ) -> Result<EntryStatus> {
        if self.fetch_type() != FetchType::Read {
            return Err(Error::unsupported_fetch_type(self.metric, "snapshot reads"));
        }
        let ticket = self
            .issue(database, None)
            .ok_or_else(|| Error::not_tracked(self.metric, database))?;

        let key = (database.clone(), params);
        if self.snapshots.contains_key(&key) {
            debug!(metric = %self.metric, database = %database, "Serving snapshot from cache");
        }
        let load = self
            .snapshots
            .try_get_with(key, self.fetch_value(database, Some(params)));
        let outcome = tokio::select! {
            () = ticket.cancel.cancelled() => {
                debug!(metric = %self.metric, database = %database, "Dropped cancelled snapshot");
                return Ok(self.status(database));
            }
            outcome = load => outcome.map_err(unshare),
        };
        self.apply(&ticket, outcome).await;
        Ok(self.status(database))
    }

    /// Fetch a snapshot in the background
    pub fn request_snapshot(
        self: &Arc<Self>,
        database: DatabaseId,
        params: FetchParams,
    ) -> JoinHandle<Result<EntryStatus>> {
        let unit = Arc::clone(self);
        tokio::spawn(async move { unit.fetch_snapshot(&database, params).await })
    }

    fn start_refresh_loop(self: &Arc<Self>, database: &DatabaseId) {
        let (epoch, cancel) = {
            let Some(mut entry) = self.entries.get_mut(database) else {
                return;
            };
            if entry.polling {
                return;
            }
            entry.polling = true;
            (entry.epoch, entry.cancel.clone())
        };

        let unit = Arc::clone(self);
        let database = database.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(unit.timing.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(ticket) = unit.issue(&database, Some(epoch)) else {
                            break;
                        };
                        // Each cycle runs on its own task so a slow fetch never
                        // delays the next tick.
                        let cycle = Arc::clone(&unit);
                        tokio::spawn(async move {
                            cycle.run_refresh(ticket).await;
                        });
                    }
                }
            }
            debug!(metric = %unit.metric, database = %database, "Refresh loop stopped");
        });
    }

    /// Reserve the next sequence number for `database`
    fn issue(&self, database: &DatabaseId, expected_epoch: Option<u64>) -> Option<FetchTicket> {
        let mut entry = self.entries.get_mut(database)?;
        if expected_epoch.is_some_and(|epoch| epoch != entry.epoch) {
            return None;
        }
        entry.issued_seq += 1;
        if entry.status == EntryStatus::Fresh {
            entry.status = EntryStatus::Refreshing;
        }
        Some(FetchTicket {
            database: database.clone(),
            epoch: entry.epoch,
            seq: entry.issued_seq,
            cancel: entry.cancel.clone(),
        })
    }

    async fn run_refresh(&self, ticket: FetchTicket) {
        let outcome = tokio::select! {
            () = ticket.cancel.cancelled() => {
                debug!(metric = %self.metric, database = %ticket.database, "Dropped cancelled refresh");
                return;
            }
            outcome = self.fetch_value(&ticket.database, None) => outcome,
        };
        self.apply(&ticket, outcome).await;
    }

    async fn fetch_value(&self, database: &DatabaseId, params: Option<FetchParams>) -> Result<f64> {
        let request = FetchRequest::new(self.metric, self.endpoint.clone(), database.clone(), params);
        let sample = tokio::time::timeout(self.timing.fetch_timeout, self.data_source.fetch(&request))
            .await
            .map_err(|_| {
                Error::timeout(
                    format!("{} fetch for {database}", self.metric),
                    self.timing.fetch_timeout,
                )
            })??;
        self.settings
            .aggregation
            .reduce(&sample.points)
            .ok_or_else(|| {
                Error::invalid_response(format!(
                    "{} returned no usable {} samples for {database}",
                    self.data_source.provider_name(),
                    self.metric
                ))
            })
    }

    async fn apply(&self, ticket: &FetchTicket, outcome: Result<f64>) {
        let event = {
            let Some(mut entry) = self.entries.get_mut(&ticket.database) else {
                debug!(metric = %self.metric, database = %ticket.database, "Dropped response for untracked database");
                return;
            };
            if entry.epoch != ticket.epoch || ticket.cancel.is_cancelled() {
                debug!(metric = %self.metric, database = %ticket.database, "Dropped response from cancelled registration");
                return;
            }
            if ticket.seq <= entry.applied_seq {
                debug!(
                    metric = %self.metric,
                    database = %ticket.database,
                    seq = ticket.seq,
                    applied = entry.applied_seq,
                    "Dropped out-of-order response"
                );
                return;
            }
            entry.applied_seq = ticket.seq;

            match outcome {
                Ok(value) => {
                    entry.latest = Some(Classified {
                        value,
                        state: self.settings.classifier.classify(value),
                        updated_at: Utc::now(),
                    });
                    entry.status = if entry.issued_seq > ticket.seq {
                        EntryStatus::Refreshing
                    } else {
                        EntryStatus::Fresh
                    };
                    entry.reading().map(|reading| MetricEvent::ValueUpdated {
                        metric: self.metric,
                        database: ticket.database.clone(),
                        reading,
                    })
                }
                Err(error) => {
                    entry.status = EntryStatus::Stale;
                    let last_known = entry.latest.map(|latest| latest.value);
                    warn!(
                        metric = %self.metric,
                        database = %ticket.database,
                        error = %error,
                        last_known = ?last_known,
                        "Fetch failed; entry marked stale"
                    );
                    Some(MetricEvent::MarkedStale {
                        metric: self.metric,
                        database: ticket.database.clone(),
                        reason: error.to_string(),
                        last_known,
                    })
                }
            }
        };
        if let Some(event) = event {
            self.publish(event).await;
        }
    }

    async fn publish(&self, event: MetricEvent) {
        if let Err(error) = self.event_bus.publish_event(event).await {
            warn!(metric = %self.metric, error = %error, "Failed to publish metric event");
        }
    }
}

impl std::fmt::Debug for TransformationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationUnit")
            .field("metric", &self.metric)
            .field("endpoint", &self.endpoint)
            .field("data_source", &self.data_source.provider_name())
            .field("tracked", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// Recover the error of a coalesced snapshot load
fn unshare(error: Arc<Error>) -> Error {
    Arc::try_unwrap(error).unwrap_or_else(|shared| Error::data_source(shared.to_string()))
}
