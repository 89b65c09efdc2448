//! Civic Daemon - report store service
//!
//! The civic daemon provides:
//! - REST API for citizen reports and their status workflow
//! - Photo upload storage
//! - Per-status statistics for the administrator dashboard

use civic_daemon::error::{DaemonError, DaemonResult};
use civic_daemon::{DaemonConfig, Server};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Civic Daemon CLI
#[derive(Parser)]
#[command(name = "civicd")]
#[command(about = "Civic Daemon - citizen report store", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CIVIC_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, env = "CIVIC_LISTEN_ADDR")]
    listen: Option<String>,

    /// Administrator bearer token
    #[arg(long, env = "CIVIC_ADMIN_TOKEN", hide_env_values = true)]
    admin_token: Option<String>,

    /// Log level
    #[arg(long, env = "CIVIC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "CIVIC_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config =
        DaemonConfig::load(cli.config.as_deref()).map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if cli.admin_token.is_some() {
        config.admin_token = cli.admin_token.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.logging.json |= cli.json;

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

    // Print startup banner
    println!(
        r#"
   ____ _       _
  / ___(_)_   _(_) ___
 | |   | \ \ / / |/ __|
 | |___| |\ V /| | (__
  \____|_| \_/ |_|\___|

  Civic Reports - Report Store
  Version: {}
  Listening: {}
  Admin API: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr,
        if config.admin_enabled() { "enabled" } else { "disabled" }
    );

    // Create and run server
    let server = Server::new(config).await?;
    server.run().await
}
