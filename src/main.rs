//! Orders dashboard server
//!
//! ```text
//! orders-dashboard --config dashboard.yaml
//! orders-dashboard --bind 0.0.0.0:8080
//! ```
//!
//! Without a configuration file the defaults apply and the dashboard serves
//! sample data. Log verbosity follows `RUST_LOG` (default `info`).

use anyhow::Result;
use clap::Parser;
use orders_dashboard::config::DashboardConfig;
use orders_dashboard::server::ServerBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orders-dashboard")]
#[command(about = "Operations dashboard for orders and fulfillment metrics")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "ORDERS_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `server.bind_addr`
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            DashboardConfig::from_yaml_file(path)?
        }
        None => DashboardConfig::default(),
    }
    .with_env_overrides()?;

    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
        config.validate()?;
    }

    tracing::info!(
        service = %config.telemetry.service_name,
        version = %config.telemetry.service_version,
        search_index = config.search_index.is_configured(),
        "Starting orders dashboard"
    );

    ServerBuilder::new().with_config(config).serve().await
}
