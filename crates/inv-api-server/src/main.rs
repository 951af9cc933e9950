//! Inventory API server binary.

use std::net::IpAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inv_api_server::{InventoryService, ServerConfig};

/// Inventory REST backend
#[derive(Parser, Debug)]
#[command(name = "inv-api-server")]
#[command(about = "REST backend for the inventory admin console")]
struct Args {
    /// Bind address (overrides INV_HTTP_HOST)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port (overrides INV_HTTP_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Start with empty tables
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs)?;

    let mut config = ServerConfig::from_env().context("Failed to read environment")?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    if args.no_seed {
        config.seed.enabled = false;
    }

    let service = InventoryService::new(config).context("Failed to create service")?;
    service
        .run(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    Ok(())
}

fn init_logging(json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tower_http=debug"))
        .context("Invalid log filter")?;

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .context("Failed to install log subscriber")?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .context("Failed to install log subscriber")?;
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
