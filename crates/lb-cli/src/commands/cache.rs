//! Cache command
//!
//! Inspect, clear and time the cached leaderboard.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use lb_core::cache::{CacheStorage, Countdown};
use lb_core::export::{Exporter, TextExporter};

/// Cache subcommands
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Show the cached leaderboard
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,

        /// Cache storage directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Remove the cached leaderboard
    Clear {
        /// Cache storage directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Show the time left until the next refresh
    Status {
        /// Show as JSON
        #[arg(long)]
        json: bool,

        /// Cache storage directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

/// Execute the cache command
pub fn execute(cmd: CacheCommand, config_path: &Path) -> Result<()> {
    match cmd {
        CacheCommand::Show { json, cache_dir } => show_cache(json, cache_dir.as_deref(), config_path),
        CacheCommand::Clear { cache_dir } => clear_cache(cache_dir.as_deref(), config_path),
        CacheCommand::Status { json, cache_dir } => {
            cache_status(json, cache_dir.as_deref(), config_path)
        }
    }
}

fn show_cache(as_json: bool, cache_dir: Option<&Path>, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let storage = super::open_storage(cache_dir, &config)?;

    let Some(cache) = storage.load()? else {
        eprintln!(
            "{} No cached leaderboard. Run '{}' to build one.",
            "⚠".yellow(),
            "leaderboard build".cyan()
        );
        return Ok(());
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&cache)?);
        return Ok(());
    }

    println!("{}", "Cached leaderboard:".bold().underline());
    println!("{}", storage.cache_path().display().to_string().dimmed());
    println!(
        "Built:   {}",
        cache.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(source) = &cache.source {
        println!("Source:  {}", source);
    }
    if let Some(digest) = &cache.digest {
        println!("Digest:  {}", digest.short());
    }
    println!("Readers: {}", cache.entries.len());
    println!();
    print!("{}", TextExporter::new().export(&cache.to_leaderboard())?);

    Ok(())
}

fn clear_cache(cache_dir: Option<&Path>, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let storage = super::open_storage(cache_dir, &config)?;

    if storage.clear()? {
        println!("{} Cache cleared.", "✓".green());
    } else {
        println!("Cache already empty.");
    }

    Ok(())
}

fn cache_status(as_json: bool, cache_dir: Option<&Path>, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let storage = super::open_storage(cache_dir, &config)?;
    let policy = config.refresh_policy();

    let cache = storage.load()?;
    let countdown = policy.countdown(cache.as_ref(), Utc::now());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&countdown)?);
        return Ok(());
    }

    match &cache {
        None => println!("{} No cached leaderboard; next build refreshes.", "⚠".yellow()),
        Some(cache) => {
            println!(
                "Last built {} ({} readers)",
                cache.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"),
                cache.entries.len()
            );
            println!("Next refresh in {}", render_countdown(&countdown));
        }
    }

    Ok(())
}

fn render_countdown(countdown: &Countdown) -> String {
    use colored::Colorize;

    if countdown.is_due() {
        "00:00 (due)".red().bold().to_string()
    } else if countdown.is_urgent {
        countdown.to_string().red().to_string()
    } else {
        countdown.to_string().green().to_string()
    }
}
