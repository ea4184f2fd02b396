//! Leaderboard cache
//!
//! Rebuilding the leaderboard means re-reading every comment and reply, so
//! a built leaderboard is kept together with the time it was built. A
//! [`RefreshPolicy`] decides when it is stale and how long until it will be.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use lb_core::cache::{LeaderboardCache, RefreshPolicy};
//!
//! let policy = RefreshPolicy::default();
//! let cache = LeaderboardCache::new(vec![]);
//!
//! assert!(!policy.needs_refresh(Some(&cache), Utc::now(), false));
//! assert!(policy.needs_refresh(Some(&cache), Utc::now() + Duration::minutes(11), false));
//! ```

mod model;
mod policy;
mod storage;

pub use model::{CacheFile, LeaderboardCache, CURRENT_SCHEMA_VERSION};
pub use policy::{Countdown, RefreshPolicy, DEFAULT_REFRESH_INTERVAL_SECS, URGENT_THRESHOLD_SECS};
pub use storage::CacheStorage;

#[cfg(test)]
pub use storage::memory::MemoryStorage;
