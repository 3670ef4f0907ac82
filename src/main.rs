//! HOS-compliant interstate trip planner CLI.
//!
//! Reads a `PlanTripRequest` as JSON, plans the trip against a routing
//! oracle, and prints the resulting `RoutePlan` as JSON.

mod cli;

use std::io::Read as _;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hos_trip_planner::config::Config;
use hos_trip_planner::services::routing::{OsrmClient, OsrmConfig};
use hos_trip_planner::types::PlanTripRequest;
use hos_trip_planner::TripCoordinator;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hos_trip_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (request, rule_set) = match cli.command {
        Some(cli::Command::Plan { request, rule_set }) => (request, rule_set),
        None => (None, None),
    };

    run_plan(config, request.as_ref(), rule_set).await
}

async fn run_plan(
    config: Config,
    request_path: Option<&std::path::PathBuf>,
    rule_set_override: Option<String>,
) -> Result<()> {
    let raw = match request_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading trip request from stdin")?;
            buf
        }
    };

    let request: PlanTripRequest =
        serde_json::from_str(&raw).context("parsing trip request JSON")?;

    let rule_set_tag = rule_set_override.unwrap_or(config.default_rule_set.clone());

    let oracle = OsrmClient::new(OsrmConfig::new(
        config.routing_oracle_url.clone(),
        Duration::from_secs(config.routing_timeout_seconds),
    ));

    let coordinator = TripCoordinator::new(&oracle, &rule_set_tag);

    info!("planning trip against rule set {}", rule_set_tag);

    match coordinator.plan_trip(&request).await {
        Ok(plan) => {
            let json = serde_json::to_string_pretty(&plan).context("serializing route plan")?;
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            error!("trip planning failed: {}", err);
            Err(err.into())
        }
    }
}
