//! Portal snapshot binary
//!
//! Prints the filter bar, metric cards, KPI pillars and reference comparison
//! for one filter state as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Default policy, dashboard catalog, no filters
//! cargo run --bin portal-snapshot
//!
//! # Analytics domain with filters applied in order
//! PORTAL_CONFIG=portal.toml \
//!   cargo run --bin portal-snapshot -- --domain=retention timeRange=academic-year status=needs-attention
//! ```
//!
//! # Environment Variables
//!
//! - `PORTAL_CONFIG`: Policy file (default: `portal.toml` search, then built-in policy)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use chrono::Utc;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use portal_metrics::config::PolicyConfig;
use portal_metrics::models::{DomainType, FilterState};
use portal_metrics::routes::{filters, kpi};
use portal_metrics::services::MetricsGenerator;

const CLEAR_ALL_THRESHOLD: usize = 1;

const DOMAIN_FLAG: &str = "--domain=";

/// Resolve the domain first, then fold every `key=value` argument in order,
/// so `--domain=` may appear anywhere on the command line.
fn parse_args(args: &[String]) -> anyhow::Result<(DomainType, FilterState)> {
    let mut domain = DomainType::Dashboard;
    for id in args.iter().filter_map(|arg| arg.strip_prefix(DOMAIN_FLAG)) {
        domain = id.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    }

    let mut state = FilterState::new();
    for arg in args.iter().filter(|arg| !arg.starts_with(DOMAIN_FLAG)) {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("expected key=value, got '{}'", arg))?;
        state = filters::apply_filter(&state, domain, key, value);
    }
    Ok((domain, state))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let policy = PolicyConfig::from_env().context("loading policy configuration")?;
    info!("Policy anchored at {}", policy.anchor);

    let args: Vec<String> = env::args().skip(1).collect();
    let (domain, state) = parse_args(&args)?;
    info!("Computing {} snapshot with {} filter(s)", domain, state.len());

    let now = Utc::now();
    let snapshot = MetricsGenerator::new(&policy).compute(&state, now);
    let pillars = kpi::compute_pillars_with(&policy.scoring);
    let comparison = portal_metrics::services::join_reference(
        &pillars,
        portal_metrics::services::kpi::REFERENCE_AVERAGES,
    );

    let output = json!({
        "generatedAt": now,
        "filterBar": filters::filter_bar_view(&state, domain, CLEAR_ALL_THRESHOLD),
        "cards": snapshot.cards(&policy.status, &state, domain),
        "metrics": snapshot,
        "pillars": pillars,
        "comparison": comparison,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
