//! Cached leaderboard and its on-disk envelope

use crate::error::{LeaderboardError, Result};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::types::ContentDigest;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Current cache file schema version
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// A built leaderboard and when it was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardCache {
    /// Ranked entries
    pub entries: Vec<LeaderboardEntry>,
    /// When the entries were built
    pub fetched_at: DateTime<Utc>,
    /// Where the comments came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Digest of the comment input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<ContentDigest>,
}

impl LeaderboardCache {
    /// Cache entries built now
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self::fetched_at(entries, Utc::now())
    }

    /// Cache entries built at an explicit time
    pub fn fetched_at(entries: Vec<LeaderboardEntry>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            entries,
            fetched_at,
            source: None,
            digest: None,
        }
    }

    /// Record where the comments came from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Record the digest of the comment input
    pub fn with_digest(mut self, digest: ContentDigest) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Time elapsed since the entries were built
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// Whether this cache was built from input with the given digest
    pub fn matches_digest(&self, digest: &ContentDigest) -> bool {
        self.digest.as_ref() == Some(digest)
    }

    /// The cached entries as a leaderboard stamped with the build time
    pub fn to_leaderboard(&self) -> Leaderboard {
        Leaderboard::at(self.entries.clone(), self.fetched_at)
    }
}

/// Versioned envelope written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// Schema version of the file
    pub schema_version: String,
    /// The cache itself
    pub cache: LeaderboardCache,
}

impl CacheFile {
    /// Wrap a cache with the current schema version
    pub fn new(cache: LeaderboardCache) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            cache,
        }
    }

    /// Unwrap the cache, rejecting files from an unknown schema
    pub fn into_cache(self) -> Result<LeaderboardCache> {
        if self.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(LeaderboardError::UnsupportedSchemaVersion(
                self.schema_version,
            ));
        }
        Ok(self.cache)
    }
}
