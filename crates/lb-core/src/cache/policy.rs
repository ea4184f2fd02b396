//! Refresh policy and countdown

use super::model::LeaderboardCache;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default time a cached leaderboard stays fresh (10 minutes)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10 * 60;

/// Seconds left below which the countdown is flagged as urgent
pub const URGENT_THRESHOLD_SECS: i64 = 30;

/// Longest accepted refresh interval (one week)
const MAX_REFRESH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// Decides when a cached leaderboard must be rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval: Duration,
}

impl RefreshPolicy {
    /// Policy with the given interval, capped at one week
    pub fn from_secs(secs: u64) -> Self {
        let secs = secs.min(MAX_REFRESH_INTERVAL_SECS) as i64;
        Self {
            interval: Duration::seconds(secs),
        }
    }

    /// The refresh interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a rebuild is required
    ///
    /// True when forced, when nothing is cached, or once a full interval has
    /// passed since the cache was built. This agrees with [`Countdown::is_due`].
    pub fn needs_refresh(
        &self,
        cache: Option<&LeaderboardCache>,
        now: DateTime<Utc>,
        force: bool,
    ) -> bool {
        match cache {
            _ if force => true,
            None => true,
            Some(cache) => cache.age(now) >= self.interval,
        }
    }

    /// When the cache becomes stale, `None` when nothing is cached
    pub fn next_refresh_at(&self, cache: Option<&LeaderboardCache>) -> Option<DateTime<Utc>> {
        cache.map(|c| c.fetched_at + self.interval)
    }

    /// Time left until the next refresh
    pub fn countdown(&self, cache: Option<&LeaderboardCache>, now: DateTime<Utc>) -> Countdown {
        match self.next_refresh_at(cache) {
            Some(next) => Countdown::from_remaining(next - now),
            None => Countdown::due(),
        }
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)
    }
}

/// Time left until the next refresh, split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    /// Whole minutes left
    pub minutes: i64,
    /// Whole seconds left after the minutes
    pub seconds: i64,
    /// Less than half a minute left
    pub is_urgent: bool,
    /// Exact milliseconds left, never negative
    pub remaining_ms: i64,
}

impl Countdown {
    /// A countdown that has run out
    pub fn due() -> Self {
        Self::from_remaining(Duration::zero())
    }

    /// Split a remaining duration; negative durations count as zero
    pub fn from_remaining(remaining: Duration) -> Self {
        let remaining_ms = remaining.num_milliseconds().max(0);
        let minutes = remaining_ms / 60_000;
        let seconds = (remaining_ms % 60_000) / 1000;
        Self {
            minutes,
            seconds,
            is_urgent: minutes == 0 && seconds <= URGENT_THRESHOLD_SECS,
            remaining_ms,
        }
    }

    /// Whether the refresh is due
    pub fn is_due(&self) -> bool {
        self.remaining_ms == 0
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
