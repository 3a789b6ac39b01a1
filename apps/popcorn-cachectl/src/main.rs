//! Command-line access to the Popcorn cache folders.

mod commands;

use anyhow::Context;
use clap::Parser;
use popcorn_core::logging::{init_file_logging, init_logging};
use popcorn_core::{CacheManager, CacheRoot, CoreConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "popcorn-cachectl")]
#[command(about = "Inspect and clean the Popcorn local cache")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Cache base directory, overrides the configuration
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,
    /// Write logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = CoreConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let level = cfg.logging.level.clone().unwrap_or_else(|| "warn".to_string());
    let _guard = match cli.log_dir.as_ref().or(cfg.logging.directory.as_ref()) {
        Some(dir) => Some(init_file_logging(dir, &level).context("failed to open log file")?),
        None => {
            init_logging(&level);
            None
        }
    };

    let manager = match cli.cache_dir {
        Some(dir) => CacheManager::new(CacheRoot::new(dir)?),
        None => CacheManager::from_config(&cfg.cache)?,
    };
    tracing::debug!(base = %manager.root().base_dir().display(), "cache resolved");

    commands::handle_command(cli.command, Arc::new(manager)).await
}
