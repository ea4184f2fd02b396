//! Leaderboard entries

use crate::types::format_points;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reader's standing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Reader name, unique within a leaderboard
    pub name: String,
    /// Highest points the reader reported
    pub points: f64,
    /// Avatar of the comment that set the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl LeaderboardEntry {
    /// Create an entry without an avatar
    pub fn new(name: impl Into<String>, points: f64) -> Self {
        Self {
            name: name.into(),
            points,
            avatar_url: None,
        }
    }

    /// Set the avatar, ignoring empty values
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        let avatar = avatar.into();
        self.avatar_url = if avatar.is_empty() { None } else { Some(avatar) };
        self
    }

    /// Points formatted for display
    pub fn display_points(&self) -> String {
        format_points(self.points)
    }
}

/// A ranked set of entries with the time it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Entries, highest points first
    pub entries: Vec<LeaderboardEntry>,
    /// When the ranking was computed
    pub generated_at: DateTime<Utc>,
}

impl Leaderboard {
    /// Wrap already ranked entries, stamped now
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self::at(entries, Utc::now())
    }

    /// Wrap already ranked entries with an explicit timestamp
    pub fn at(entries: Vec<LeaderboardEntry>, generated_at: DateTime<Utc>) -> Self {
        Self {
            entries,
            generated_at,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based position of `name`, if present
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }

    /// Entry for `name`, if present
    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The first `n` entries
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Iterate entries with their 1-based rank
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &LeaderboardEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Leaderboard {
        Leaderboard::new(vec![
            LeaderboardEntry::new("a", 30.0),
            LeaderboardEntry::new("b", 20.0),
            LeaderboardEntry::new("c", 10.0),
        ])
    }

    #[test]
    fn test_rank_of() {
        let board = sample();
        assert_eq!(board.rank_of("a"), Some(1));
        assert_eq!(board.rank_of("c"), Some(3));
        assert_eq!(board.rank_of("zzz"), None);
    }

    #[test]
    fn test_top() {
        let board = sample();
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(10).len(), 3);
        assert!(Leaderboard::new(vec![]).top(3).is_empty());
    }

    #[test]
    fn test_ranked() {
        let board = sample();
        let ranks: Vec<(usize, &str)> = board
            .ranked()
            .map(|(r, e)| (r, e.name.as_str()))
            .collect();
        assert_eq!(ranks, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_with_avatar_ignores_empty() {
        assert_eq!(LeaderboardEntry::new("a", 1.0).with_avatar("").avatar_url, None);
        assert_eq!(
            LeaderboardEntry::new("a", 1.0).with_avatar("x").avatar_url,
            Some("x".to_string())
        );
    }

    #[test]
    fn test_entry_serialization() {
        let entry = LeaderboardEntry::new("a", 9.0).with_avatar("x.png");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"a","points":9.0,"avatarUrl":"x.png"}"#);

        let bare = serde_json::to_string(&LeaderboardEntry::new("b", 1.5)).unwrap();
        assert_eq!(bare, r#"{"name":"b","points":1.5}"#);
    }

    #[test]
    fn test_display_points() {
        assert_eq!(LeaderboardEntry::new("a", 202.0).display_points(), "202");
        assert_eq!(LeaderboardEntry::new("a", 2.5).display_points(), "2.5");
    }
}
