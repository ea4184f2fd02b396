//! Configuration management for leaderboard

use crate::cache::{RefreshPolicy, DEFAULT_REFRESH_INTERVAL_SECS};
use crate::error::{LeaderboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Export formats the default export manager knows about
pub const KNOWN_FORMATS: &[&str] = &["json", "json-compact", "markdown", "text"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comment source settings
    pub source: SourceConfig,
    /// Cache settings
    pub cache: CacheConfig,
    /// Reply collection settings
    pub replies: RepliesConfig,
    /// Ranking settings
    pub leaderboard: LeaderboardConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LeaderboardError::Io(e).with_context(format!("reading {}", path.display())))?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No configuration at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Write configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<()> {
        if self.cache.refresh_interval_secs == 0 {
            return Err(LeaderboardError::Config(
                "cache.refresh_interval_secs must be greater than zero".to_string(),
            ));
        }
        if !KNOWN_FORMATS.contains(&self.export.default_format.as_str()) {
            return Err(LeaderboardError::Config(format!(
                "export.default_format '{}' is not one of: {}",
                self.export.default_format,
                KNOWN_FORMATS.join(", ")
            )));
        }
        if self.source.chapter_id.trim().is_empty() {
            return Err(LeaderboardError::Config(
                "source.chapter_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Refresh policy for the cache
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::from_secs(self.cache.refresh_interval_secs)
    }

    /// Pause between reply requests
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.replies.delay_ms)
    }
}

/// Which chapter the comments belong to
///
/// The chapter id keys the cache; the URL is recorded as the cache source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Chapter whose comments are ranked
    pub chapter_id: String,
    /// Human-facing chapter URL
    pub chapter_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            chapter_id: "1573385572".to_string(),
            chapter_url: "https://www.wattpad.com/1573385572-rainbow-bookclub-september-2025"
                .to_string(),
        }
    }
}

/// Cache-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a built leaderboard stays fresh
    pub refresh_interval_secs: u64,
    /// Cache directory, platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            dir: None,
        }
    }
}

/// Reply collection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepliesConfig {
    /// Whether replies are collected at all
    pub enabled: bool,
    /// Pause after each reply request, in milliseconds
    pub delay_ms: u64,
}

impl Default for RepliesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: 300,
        }
    }
}

/// Ranking configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// List readers who never reported points, with 0 points
    pub include_unscored: bool,
}

/// Export-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default export format
    pub default_format: String,
    /// Heading for Markdown output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            title: None,
        }
    }
}
