//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod build;
pub mod cache;
pub mod config;
pub mod parse;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lb_core::config::Config;
use lb_storage::FileSystemStorage;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".leaderboard/config.toml";

/// leaderboard - rank readers by the points they report in comments
#[derive(Debug, Parser)]
#[command(name = "leaderboard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LEADERBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the leaderboard from a comments dump
    Build(build::BuildArgs),

    /// Extract points from a single comment
    Parse(parse::ParseArgs),

    /// Inspect or clear the cached leaderboard
    #[command(subcommand)]
    Cache(cache::CacheCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = config_path(cli.config.as_deref());

    match cli.command {
        Commands::Build(args) => build::execute(args, &config_path),
        Commands::Parse(args) => parse::execute(args),
        Commands::Cache(cmd) => cache::execute(cmd, &config_path),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

/// Configuration file to use, honouring `--config`
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load and validate the configuration, defaults when the file is missing
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

/// Cache storage from `--cache-dir`, the configuration, or the platform default
pub fn open_storage(explicit: Option<&Path>, config: &Config) -> Result<FileSystemStorage> {
    let dir = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.cache.dir.clone())
        .unwrap_or_else(FileSystemStorage::default_base_dir);
    FileSystemStorage::new(&dir)
        .with_context(|| format!("Failed to open cache directory {}", dir.display()))
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
