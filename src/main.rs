//! Task Dashboard MCP Server - Main Entry Point
//!
//! The actual implementation is in the `task_dashboard` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use task_dashboard::{ConfigOverrides, DashboardConfig, TaskDashboardHandler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Task Dashboard MCP Server - CSV task tracking via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the CSV task file
    file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Commit the task file to git on every save
    #[arg(long)]
    sync_git: bool,

    /// Write through a temporary file and rename it into place
    #[arg(long)]
    atomic_writes: bool,

    /// Classification report JSON (metrics.json)
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Confusion matrix CSV (confusion_matrix.csv)
    #[arg(long)]
    confusion_matrix: Option<PathBuf>,

    /// Best hyperparameters JSON (best_params.json)
    #[arg(long)]
    best_params: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_file: self.file.clone(),
            sync_git: self.sync_git,
            atomic_writes: self.atomic_writes,
            metrics: self.metrics.clone(),
            confusion_matrix: self.confusion_matrix.clone(),
            best_params: self.best_params.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    // stdout carries the MCP transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("task_dashboard=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    }
    .merge(args.overrides());

    let handler = TaskDashboardHandler::from_config(&config)?;
    info!(path = %handler.storage().file_path().display(), "serving task dashboard");
    serve_stdio(handler).await?;
    Ok(())
}
