//! Command line interface

use clap::Parser;
use cockpit_domain::{DatabaseId, Metric, MetricValueStateOrder};
use std::path::PathBuf;

/// Databases watched in `--demo` mode when none are named
pub const DEMO_DATABASES: [&str; 3] = ["hyrise-1", "hyrise-2", "hyrise-3"];

/// Command line interface for the metric watcher
#[derive(Parser, Debug)]
#[command(name = "cockpit")]
#[command(about = "Cockpit - Rank database instances by their monitored metrics")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database to watch (repeatable)
    #[arg(short, long = "database", value_name = "ID")]
    pub databases: Vec<String>,

    /// Metric to rank by (repeatable); all metrics when omitted
    #[arg(short, long = "metric", value_name = "METRIC", value_parser = parse_metric)]
    pub metrics: Vec<Metric>,

    /// Ranking direction: `desc` puts high states first
    #[arg(short, long, default_value = "desc", value_parser = parse_order)]
    pub order: MetricValueStateOrder,

    /// Stop after this many refresh ticks
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Serve generated values instead of querying the backend
    #[arg(long)]
    pub demo: bool,

    /// Print without ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Databases to select, falling back to the demo set in `--demo` mode
    pub fn database_ids(&self) -> Vec<DatabaseId> {
        if self.databases.is_empty() && self.demo {
            return DEMO_DATABASES.iter().map(|id| DatabaseId::new(*id)).collect();
        }
        self.databases.iter().map(DatabaseId::new).collect()
    }

    /// Metrics to select, every metric when none were named
    pub fn selected_metrics(&self) -> Vec<Metric> {
        if self.metrics.is_empty() {
            Metric::ALL.to_vec()
        } else {
            self.metrics.clone()
        }
    }
}

fn parse_metric(value: &str) -> cockpit_domain::Result<Metric> {
    value.parse()
}

fn parse_order(value: &str) -> cockpit_domain::Result<MetricValueStateOrder> {
    value.parse()
}
