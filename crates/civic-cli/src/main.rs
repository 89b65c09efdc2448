//! Civic CLI - terminal front-end for citizen reports
//!
//! This CLI lets citizens and administrators:
//! - Submit reports with a photo and optional location
//! - Browse reports filtered by status
//! - Move reports through their status workflow
//! - View the statistics dashboard

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod config;
mod error;
mod output;
mod prompt;

use civic_lifecycle::Privilege;
use client::HttpReportStore;
use commands::{report, stats, CommandContext};
use config::CliConfig;
use error::CliResult;
use output::{print_error, print_success};

const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Civic CLI application
#[derive(Parser)]
#[command(name = "civic")]
#[command(about = "Civic Reports - submit and triage citizen reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CIVIC_CONFIG", global = true)]
    config: Option<String>,

    /// Report store endpoint
    #[arg(long, env = "CIVIC_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Administrator token; enables status changes and the dashboard
    #[arg(long, env = "CIVIC_ADMIN_TOKEN", hide_env_values = true, global = true)]
    admin_token: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Submit, list and triage reports
    Report {
        #[command(subcommand)]
        command: report::ReportCommands,
    },

    /// Show the statistics dashboard (administrators only)
    #[command(alias = "dashboard")]
    Stats,

    /// Show configuration
    Config,

    /// Check report store connectivity
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        if !e.already_reported() {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let endpoint = cli
        .endpoint
        .or_else(|| config.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let admin_token = cli
        .admin_token
        .or_else(|| config.admin_token.clone())
        .filter(|t| !t.is_empty());

    let privilege = match &admin_token {
        Some(token) => Privilege::administrator(token.clone()),
        None => Privilege::Viewer,
    };

    // Create client
    let store = HttpReportStore::new(&endpoint, admin_token, config.timeout())?;

    let ctx = CommandContext {
        store,
        config,
        privilege,
        format: cli.output,
    };

    // Execute command
    match cli.command {
        Commands::Report { command } => report::execute(command, &ctx).await,
        Commands::Stats => stats::execute(&ctx).await,
        Commands::Config => {
            println!("Endpoint: {}", endpoint);
            println!("Privilege: {:?}", ctx.privilege);
            println!(
                "Redirect delay: {:?}",
                ctx.config.controller().redirect_delay
            );
            println!("Timeout: {:?}", ctx.config.timeout());
            Ok(())
        }
        Commands::Status => match ctx.store.health_check().await {
            Ok(status) => {
                print_success(&format!("Report store is {}", status.status));
                println!("  Endpoint: {}", endpoint);
                println!("  Version: {}", status.version);
                println!("  Uptime: {}", status.uptime);
                Ok(())
            }
            Err(e) => Err(error::CliError::Config(format!(
                "Cannot connect to report store at {}: {}",
                endpoint, e
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_create_accepts_short_flags_next_to_global_config() {
        let cli = Cli::try_parse_from([
            "civic", "-c", "civic.toml", "report", "create", "-a", "Av. X 123", "-m",
            "Hay un bache enorme", "-p", "bache.jpg",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("civic.toml"));
        assert!(matches!(
            cli.command,
            Commands::Report {
                command: report::ReportCommands::Create { .. }
            }
        ));
    }
}
