//! `iam-ctl`: loads declarative IAM resources next to the database and
//! serves organization unit and layout queries from the command line.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;
mod config;

use commands::{LayoutCommand, OuCommand};
use config::AppConfig;

#[derive(Parser)]
#[command(name = "iam-ctl")]
#[command(about = "Organization units and layouts over mutable and declarative stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file; `IAM__*` environment variables override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load declarative resources and report the store mode of each kind
    Check,

    /// Organization unit queries and changes
    #[command(subcommand)]
    Ou(OuCommand),

    /// Layout queries
    #[command(subcommand)]
    Layout(LayoutCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref())?;

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = bootstrap::start(&cfg).await?;

    match cli.command {
        Commands::Check => commands::print_json(&app.reports),
        Commands::Ou(cmd) => commands::run_ou(cmd, &app).await,
        Commands::Layout(cmd) => commands::run_layout(cmd, &app).await,
    }
}
