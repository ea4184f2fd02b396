//! Cache storage trait

use super::model::LeaderboardCache;
use crate::error::Result;

/// Trait for leaderboard cache storage implementations
pub trait CacheStorage: Send + Sync {
    /// Load the cached leaderboard, `None` when nothing is cached
    fn load(&self) -> Result<Option<LeaderboardCache>>;

    /// Replace the cached leaderboard
    fn save(&self, cache: &LeaderboardCache) -> Result<()>;

    /// Remove the cached leaderboard, returning whether anything was removed
    fn clear(&self) -> Result<bool>;

    /// Check if a cached leaderboard exists
    fn exists(&self) -> bool;
}
