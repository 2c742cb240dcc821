//! Watch loop
//!
//! Selects the requested databases and metrics, then prints one ranking per
//! metric on every refresh tick until the tick limit is reached or the process
//! is interrupted.

use crate::cli::Cli;
use anyhow::{Context, bail};
use cockpit_application::{IncompleteReason, Ranking};
use cockpit_domain::{MetricValueState, MetricValueStateOrder};
use cockpit_infrastructure::bootstrap::CockpitContext;
use cockpit_infrastructure::config::{AppConfig, ConfigLoader};
use cockpit_infrastructure::logging::init_logging;
use cockpit_providers::data_source::InMemoryDataSource;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::info;

const ANSI_RESET: &str = "\x1b[0m";

/// Run the watcher described by `cli`
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    let databases = cli.database_ids();
    if databases.is_empty() {
        bail!("no database selected; pass --database <ID> or --demo");
    }
    let metrics = cli.selected_metrics();
    let interval = config.refresh.timing().interval;

    let context = if cli.demo {
        CockpitContext::with_data_source(config, Arc::new(InMemoryDataSource::demo()))?
    } else {
        CockpitContext::from_config(config)?
    };

    let comparison = context.comparison();
    for metric in &metrics {
        comparison.select_metric(*metric).await;
    }
    for database in databases {
        comparison.select_database(database).await;
    }
    info!(
        databases = comparison.selected_databases().len(),
        metrics = metrics.len(),
        order = %cli.order,
        "Watching"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately; give the first fetches one interval
    ticker.tick().await;

    let style = if cli.no_color {
        RenderStyle::Plain
    } else {
        RenderStyle::Ansi
    };
    let mut stdout = std::io::stdout();
    let mut tick = 0_u64;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
        tick += 1;

        let rankings = comparison.rank_selected(cli.order);
        stdout
            .write_all(render_tick(tick, &rankings, style).as_bytes())
            .and_then(|()| stdout.flush())
            .context("failed to write rankings")?;

        if cli.ticks.is_some_and(|max| tick >= max) {
            break;
        }
    }

    context.shutdown().await;
    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Output flavour of rendered rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// No escape sequences
    Plain,
    /// State names in their tile colors
    Ansi,
}

/// All rankings of one tick
pub fn render_tick(tick: u64, rankings: &[Ranking], style: RenderStyle) -> String {
    let mut out = format!("── tick {tick} ──\n");
    for ranking in rankings {
        out.push_str(&render_ranking(ranking, style));
    }
    out
}

/// One metric's ranking, ranked rows first, then rows without a fresh value
pub fn render_ranking(ranking: &Ranking, style: RenderStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        ranking.metric.title(),
        order_label(ranking.order)
    );

    for (position, row) in ranking.ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<16} {:>14.2}  {}{}",
            position + 1,
            row.database.as_str(),
            row.value,
            paint(row.state, style),
            if row.stale { "  (stale)" } else { "" }
        );
    }

    for entry in &ranking.incomplete {
        // Stale rows with a value were already listed above
        let listed = ranking.ranked.iter().any(|row| row.database == entry.database);
        if entry.reason == IncompleteReason::Stale && listed {
            continue;
        }
        let _ = writeln!(
            out,
            "   -  {:<16} {}",
            entry.database.as_str(),
            reason_label(entry.reason)
        );
    }
    out
}

fn order_label(order: MetricValueStateOrder) -> &'static str {
    match order {
        MetricValueStateOrder::Desc => "high first",
        MetricValueStateOrder::Asc => "low first",
    }
}

fn reason_label(reason: IncompleteReason) -> &'static str {
    match reason {
        IncompleteReason::NotTracked => "not tracked",
        IncompleteReason::NoDataYet => "no data yet",
        IncompleteReason::Stale => "stale, no value",
    }
}

fn paint(state: MetricValueState, style: RenderStyle) -> String {
    match (style, ansi_foreground(state.color())) {
        (RenderStyle::Ansi, Some(escape)) => format!("{escape}{:<7}{ANSI_RESET}", state.as_str()),
        _ => format!("{:<7}", state.as_str()),
    }
}

/// 24-bit foreground escape for a `#rrggbb` color
fn ansi_foreground(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(format!(
        "\x1b[38;2;{};{};{}m",
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?
    ))
}
