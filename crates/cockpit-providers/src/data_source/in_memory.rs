//! In-Memory Metric Data Source
//!
//! Scripted responses per (metric, database), served in push order. Once a
//! script runs dry the steady value (if any) is served, then the generator.
//! Gated responses are held until their gate is notified, which lets tests
//! control completion order.
//!
//! ## Example
//!
//! ```ignore
//! use cockpit_providers::data_source::InMemoryDataSource;
//!
//! let source = InMemoryDataSource::new();
//! source.push_value(Metric::Cpu, &db, 42.0);
//! let gate = source.push_gated_value(Metric::Cpu, &db, 10.0);
//! // ... the second fetch blocks until:
//! gate.notify_one();
//! ```

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

use cockpit_domain::error::{Error, Result};
use cockpit_domain::ports::MetricDataSource;
use cockpit_domain::{DatabaseId, FetchRequest, Metric, RawSample};

type ScriptKey = (Metric, DatabaseId);

/// Fallback producer for unscripted requests
pub type SampleGenerator = Arc<dyn Fn(&FetchRequest) -> Option<RawSample> + Send + Sync>;

enum Scripted {
    Sample(RawSample),
    Failure(String),
    Gated { gate: Arc<Notify>, then: Box<Scripted> },
}

/// Scripted data source for tests and demo runs
#[derive(Default)]
pub struct InMemoryDataSource {
    scripts: DashMap<ScriptKey, VecDeque<Scripted>>,
    steady: DashMap<ScriptKey, RawSample>,
    generator: Option<SampleGenerator>,
    calls: DashMap<ScriptKey, usize>,
    requests: DashMap<FetchRequest, usize>,
}

impl InMemoryDataSource {
    /// Create an empty data source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Serve unscripted requests from `generator`
    #[must_use]
    pub fn with_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(&FetchRequest) -> Option<RawSample> + Send + Sync + 'static,
    {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Data source producing plausible drifting values for every request
    pub fn demo() -> Self {
        Self::new().with_generator(demo_sample)
    }

    /// Queue a single-value response
    pub fn push_value(&self, metric: Metric, database: &DatabaseId, value: f64) {
        self.push(metric, database, Scripted::Sample(RawSample::single(value)));
    }

    /// Queue a multi-point response
    pub fn push_sample(&self, metric: Metric, database: &DatabaseId, sample: RawSample) {
        self.push(metric, database, Scripted::Sample(sample));
    }

    /// Queue a failed response
    pub fn push_failure(&self, metric: Metric, database: &DatabaseId, message: impl Into<String>) {
        self.push(metric, database, Scripted::Failure(message.into()));
    }

    /// Queue a response held until the returned gate is notified
    pub fn push_gated_value(&self, metric: Metric, database: &DatabaseId, value: f64) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(
            metric,
            database,
            Scripted::Gated {
                gate: Arc::clone(&gate),
                then: Box::new(Scripted::Sample(RawSample::single(value))),
            },
        );
        gate
    }

    /// Serve `value` whenever the script for (metric, database) is empty
    pub fn set_value(&self, metric: Metric, database: &DatabaseId, value: f64) {
        self.steady
            .insert((metric, database.clone()), RawSample::single(value));
    }

    /// Fetches issued for (metric, database)
    pub fn call_count(&self, metric: Metric, database: &DatabaseId) -> usize {
        self.calls
            .get(&(metric, database.clone()))
            .map_or(0, |count| *count)
    }

    /// Fetches issued with exactly `request`
    pub fn request_count(&self, request: &FetchRequest) -> usize {
        self.requests.get(request).map_or(0, |count| *count)
    }

    /// Fetches issued overall
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|count| *count.value()).sum()
    }

    fn push(&self, metric: Metric, database: &DatabaseId, scripted: Scripted) {
        self.scripts
            .entry((metric, database.clone()))
            .or_default()
            .push_back(scripted);
    }

    fn next_scripted(&self, key: &ScriptKey) -> Option<Scripted> {
        self.scripts.get_mut(key)?.pop_front()
    }
}

#[async_trait]
impl MetricDataSource for InMemoryDataSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<RawSample> {
        let key = (request.metric, request.database.clone());
        *self.calls.entry(key.clone()).or_default() += 1;
        *self.requests.entry(request.clone()).or_default() += 1;

        let mut scripted = self.next_scripted(&key);
        loop {
            match scripted {
                Some(Scripted::Sample(sample)) => return Ok(sample),
                Some(Scripted::Failure(message)) => return Err(Error::data_source(message)),
                Some(Scripted::Gated { gate, then }) => {
                    gate.notified().await;
                    scripted = Some(*then);
                }
                None => break,
            }
        }

        if let Some(sample) = self.steady.get(&key) {
            return Ok(sample.clone());
        }
        self.generator
            .as_ref()
            .and_then(|generator| generator(request))
            .ok_or_else(|| {
                Error::data_source(format!(
                    "no sample scripted for {} on {}",
                    request.metric, request.database
                ))
            })
    }

    fn provider_name(&self) -> &str {
        "in-memory"
    }
}

impl std::fmt::Debug for InMemoryDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDataSource")
            .field("scripted", &self.scripts.len())
            .field("steady", &self.steady.len())
            .field("generator", &self.generator.is_some())
            .field("calls", &self.total_calls())
            .finish()
    }
}

/// Typical magnitude of each metric, used to scale demo values
fn demo_scale(metric: Metric) -> f64 {
    match metric {
        Metric::Access => 5_000.0,
        Metric::Cpu | Metric::Ram => 100.0,
        Metric::Latency => 2.0e7,
        Metric::QueueLength => 200.0,
        Metric::Storage => 2.0e9,
        Metric::Throughput => 2_000.0,
    }
}

fn demo_sample(request: &FetchRequest) -> Option<RawSample> {
    let seed = request
        .metric
        .as_str()
        .bytes()
        .chain(request.database.as_str().bytes())
        .fold(17_u32, |acc, byte| {
            acc.wrapping_mul(31).wrapping_add(u32::from(byte))
        });
    let phase = f64::from(seed % 360).to_radians();
    let seconds = Utc::now().timestamp_millis() as f64 / 1000.0;
    let wave = (seconds / 7.0 + phase).sin() * 0.5 + 0.5;
    Some(RawSample::single(demo_scale(request.metric) * wave))
}
