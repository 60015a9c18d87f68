//! Livebox exporter - Prometheus exporter for Orange Livebox gateways
//!
//! Polls the gateway's sysbus API every few seconds and serves the latest
//! DSL line and device telemetry on a scrape endpoint.

use clap::Parser;
use livebox_daemon::{DaemonError, DaemonResult, ExporterConfig, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Livebox exporter CLI
#[derive(Parser)]
#[command(name = "livebox-exporter")]
#[command(about = "Prometheus exporter for Livebox DSL gateways", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LIVEBOX_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "LIVEBOX_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "LIVEBOX_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "LIVEBOX_LOG_JSON")]
    json: bool,

    /// Poll period in seconds
    #[arg(long)]
    poll_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config =
        ExporterConfig::load(cli.config.as_deref()).map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(secs) = cli.poll_interval {
        config.scheduler.poll_interval_secs = secs;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    let config = config
        .validate()
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::debug!(?config, "Configuration loaded");

    let server = Server::new(config)?;
    let result = server.run().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Livebox exporter stopped");
    }
    result
}
