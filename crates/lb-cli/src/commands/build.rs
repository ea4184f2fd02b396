//! Build command
//!
//! Turn a saved comments page into a ranked leaderboard.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use lb_core::cache::{CacheStorage, LeaderboardCache, RefreshPolicy};
use lb_core::comment::{decode_comments, CommentAnnotator};
use lb_core::config::Config;
use lb_core::export::{ExportManager, MarkdownExporter};
use lb_core::leaderboard::{Leaderboard, LeaderboardBuilder};
use lb_core::replies::ReplyCollector;
use lb_core::types::{ContentDigest, DigestBuilder};
use lb_storage::DirectoryReplySource;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON API envelope
    Json,
    /// Single-line JSON API envelope
    JsonCompact,
    /// Markdown table
    Markdown,
    /// Numbered plain text lines
    Text,
}

impl ExportFormat {
    /// Name the export manager knows this format by
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::JsonCompact => "json-compact",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Text => "text",
        }
    }
}

/// Arguments for the build command
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Comments page (API shape or array of comment records)
    #[arg(long)]
    pub comments: PathBuf,

    /// Directory of reply pages named <commentId>.json
    #[arg(long)]
    pub replies_dir: Option<PathBuf>,

    /// Pause between reply pages in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    pub reply_delay: Option<u64>,

    /// Export format (config default when omitted)
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// List readers without reported points at 0
    #[arg(long)]
    pub include_unscored: bool,

    /// Cache storage directory
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Rebuild even if the cached leaderboard is still fresh
    #[arg(long)]
    pub refresh: bool,

    /// Neither read nor write the cache
    #[arg(long, conflicts_with = "refresh")]
    pub no_cache: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let now = Utc::now();

    let raw = fs::read(&args.comments)
        .with_context(|| format!("Failed to read {}", args.comments.display()))?;
    let digest = input_digest(&raw, &args, &config)?;
    let source = args.comments.display().to_string();

    let storage = if args.no_cache {
        None
    } else {
        Some(super::open_storage(args.cache_dir.as_deref(), &config)?)
    };
    let policy = config.refresh_policy();

    let cached = storage.as_ref().and_then(|s| match s.load() {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Ignoring unreadable cache: {}", e);
            None
        }
    });

    let board = match reusable(cached.as_ref(), &digest, &policy, now, args.refresh) {
        Some(cache) => {
            eprintln!(
                "{} Using cached leaderboard (next refresh in {})",
                "↺".cyan(),
                policy.countdown(Some(cache), now).to_string().yellow()
            );
            cache.to_leaderboard()
        }
        None => {
            let text = String::from_utf8(raw)
                .with_context(|| format!("{} is not valid UTF-8", args.comments.display()))?;
            let board = build_board(&text, &args, &config, now)?;

            if let Some(storage) = &storage {
                let cache = LeaderboardCache::fetched_at(board.entries.clone(), now)
                    .with_source(config.source.chapter_url.as_str())
                    .with_digest(digest);
                storage.save(&cache).context("Failed to save leaderboard cache")?;
            }

            eprintln!(
                "{} Ranked {} readers from {}",
                "✓".green(),
                board.len().to_string().yellow(),
                source.cyan()
            );
            board
        }
    };

    let format = args
        .format
        .map(ExportFormat::name)
        .unwrap_or(config.export.default_format.as_str());
    let manager = export_manager(&config);

    if board.is_empty() {
        eprintln!("{} No points reported yet", "⚠".yellow());
    }

    if let Some(output_path) = &args.output {
        let written = manager
            .export_to_file(&board, format, output_path)
            .with_context(|| format!("Failed to write to {}", output_path.display()))?;
        eprintln!("{} Exported to {}", "✓".green(), written.display());
    } else {
        let output = manager.export(&board, format)?;
        let mut stdout = std::io::stdout();
        stdout
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?;
        if !output.ends_with('\n') {
            writeln!(stdout).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Digest over every input that changes the ranking
///
/// Covers the chapter, the comments file, the unscored switch and, when
/// replies are collected, the reply directory and every page in it. The
/// export format and reply delay are left out.
fn input_digest(raw: &[u8], args: &BuildArgs, config: &Config) -> Result<ContentDigest> {
    let mut digest = DigestBuilder::new();
    digest
        .field("chapter", config.source.chapter_id.as_bytes())
        .field("comments", raw)
        .flag("include_unscored", include_unscored(args, config));

    match reply_dir(args, config) {
        Some(dir) => {
            digest.field("replies_dir", dir.to_string_lossy().as_bytes());
            DirectoryReplySource::new(dir)
                .digest_pages(&mut digest)
                .with_context(|| format!("Failed to read reply pages in {}", dir.display()))?;
        }
        None => {
            digest.flag("replies", false);
        }
    }

    Ok(digest.finish())
}

fn include_unscored(args: &BuildArgs, config: &Config) -> bool {
    args.include_unscored || config.leaderboard.include_unscored
}

/// Reply directory to read, `None` when replies are off or no directory was given
fn reply_dir<'a>(args: &'a BuildArgs, config: &Config) -> Option<&'a Path> {
    args.replies_dir
        .as_deref()
        .filter(|_| config.replies.enabled)
}

/// The cache, when it was built from the same input and is still fresh
fn reusable<'a>(
    cached: Option<&'a LeaderboardCache>,
    digest: &ContentDigest,
    policy: &RefreshPolicy,
    now: DateTime<Utc>,
    force: bool,
) -> Option<&'a LeaderboardCache> {
    cached.filter(|cache| {
        cache.matches_digest(digest) && !policy.needs_refresh(Some(*cache), now, force)
    })
}

fn build_board(
    text: &str,
    args: &BuildArgs,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<Leaderboard> {
    let mut comments = decode_comments(text)
        .with_context(|| format!("Failed to decode comments in {}", args.comments.display()))?;
    info!("Decoded {} top-level comments", comments.len());

    match reply_dir(args, config) {
        Some(dir) => {
            let delay = args
                .reply_delay
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.reply_delay());
            let collector = ReplyCollector::new(DirectoryReplySource::new(dir)).with_delay(delay);
            let (all, stats) = collector.collect_with_stats(comments);
            if stats.failed > 0 {
                warn!("{} reply pages could not be read", stats.failed);
            }
            comments = all;
        }
        None if args.replies_dir.is_some() => {
            info!("Reply collection disabled in configuration")
        }
        None => {}
    }

    let annotated = CommentAnnotator::new().annotate_owned(comments);
    let entries = LeaderboardBuilder::new()
        .include_unscored(include_unscored(args, config))
        .build(&annotated);

    Ok(Leaderboard::at(entries, now))
}

/// Export manager honouring the configured Markdown title
fn export_manager(config: &Config) -> ExportManager {
    let mut manager = ExportManager::new();
    if let Some(title) = &config.export.title {
        manager.register(Box::new(MarkdownExporter::new().with_title(title.as_str())));
    }
    manager
}
