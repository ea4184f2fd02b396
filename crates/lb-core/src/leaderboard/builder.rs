//! Per-reader maximum and ranking

use super::entry::LeaderboardEntry;
use crate::comment::AnnotatedComment;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Reduces annotated comments to a ranked leaderboard
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardBuilder {
    include_unscored: bool,
}

impl LeaderboardBuilder {
    /// Create a builder that lists only readers with points
    pub fn new() -> Self {
        Self::default()
    }

    /// Also list named readers who never reported points, with 0 points
    pub fn include_unscored(mut self, include: bool) -> Self {
        self.include_unscored = include;
        self
    }

    /// Build the ranking
    ///
    /// Comments without a name are skipped. A reader's entry is replaced only
    /// when a later comment reports strictly more points, so ties keep the
    /// earlier comment's avatar. Entries are sorted by points, highest first;
    /// equal points keep the order in which readers first scored.
    pub fn build(&self, annotated: &[AnnotatedComment]) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut unscored: Vec<&AnnotatedComment> = Vec::new();
        let mut unscored_names: HashSet<&str> = HashSet::new();
        let mut skipped = 0usize;

        for comment in annotated {
            let name = comment.name();
            if name.is_empty() {
                skipped += 1;
                continue;
            }

            let existing = positions.get(name).copied();
            let current = existing.map(|i| entries[i].points).unwrap_or(0.0);
            if comment.points > current {
                let entry =
                    LeaderboardEntry::new(name, comment.points).with_avatar(comment.avatar());
                match existing {
                    Some(i) => entries[i] = entry,
                    None => {
                        positions.insert(name, entries.len());
                        entries.push(entry);
                    }
                }
            } else if self.include_unscored
                && !positions.contains_key(name)
                && unscored_names.insert(name)
            {
                unscored.push(comment);
            }
        }

        if self.include_unscored {
            entries.extend(
                unscored
                    .into_iter()
                    .filter(|c| !positions.contains_key(c.name()))
                    .map(|c| LeaderboardEntry::new(c.name(), 0.0).with_avatar(c.avatar())),
            );
        }

        entries.sort_by(|a, b| b.points.total_cmp(&a.points));

        debug!(
            comments = annotated.len(),
            entries = entries.len(),
            skipped,
            "Built leaderboard"
        );
        entries
    }
}

/// Build a leaderboard listing only readers with points
pub fn build(annotated: &[AnnotatedComment]) -> Vec<LeaderboardEntry> {
    LeaderboardBuilder::new().build(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{annotate, Comment};
    use pretty_assertions::assert_eq;

    fn scored(name: &str, points: f64) -> AnnotatedComment {
        AnnotatedComment {
            comment: Comment::new(name, ""),
            points,
            points_found: points > 0.0,
        }
    }

    fn with_avatar(name: &str, points: f64, avatar: &str) -> AnnotatedComment {
        AnnotatedComment {
            comment: Comment::new(name, "").with_avatar(avatar),
            points,
            points_found: points > 0.0,
        }
    }

    fn summary(entries: &[LeaderboardEntry]) -> Vec<(&str, f64)> {
        entries.iter().map(|e| (e.name.as_str(), e.points)).collect()
    }

    #[test]
    fn test_max_per_name_sorted_descending() {
        let board = build(&[scored("A", 5.0), scored("A", 9.0), scored("B", 3.0)]);
        assert_eq!(summary(&board), vec![("A", 9.0), ("B", 3.0)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn test_skips_missing_names() {
        let board = build(&[scored("", 100.0), scored("A", 1.0)]);
        assert_eq!(summary(&board), vec![("A", 1.0)]);
    }

    #[test]
    fn test_lower_later_score_is_ignored() {
        let board = build(&[scored("A", 50.0), scored("A", 10.0)]);
        assert_eq!(summary(&board), vec![("A", 50.0)]);
    }

    #[test]
    fn test_avatar_follows_winning_comment() {
        let board = build(&[
            with_avatar("A", 5.0, "old.png"),
            with_avatar("A", 9.0, "new.png"),
        ]);
        assert_eq!(board[0].avatar_url.as_deref(), Some("new.png"));
    }

    #[test]
    fn test_tie_keeps_earlier_avatar() {
        let board = build(&[
            with_avatar("A", 9.0, "first.png"),
            with_avatar("A", 9.0, "second.png"),
        ]);
        assert_eq!(board[0].avatar_url.as_deref(), Some("first.png"));
    }

    #[test]
    fn test_ties_keep_first_scored_order() {
        let board = build(&[
            scored("C", 1.0),
            scored("B", 7.0),
            scored("A", 7.0),
            scored("C", 7.0),
        ]);
        assert_eq!(summary(&board), vec![("C", 7.0), ("B", 7.0), ("A", 7.0)]);
    }

    #[test]
    fn test_unscored_readers_excluded_by_default() {
        let board = build(&[scored("A", 0.0), scored("B", 4.0)]);
        assert_eq!(summary(&board), vec![("B", 4.0)]);
    }

    #[test]
    fn test_include_unscored() {
        let board = LeaderboardBuilder::new().include_unscored(true).build(&[
            with_avatar("Z", 0.0, "z.png"),
            scored("B", 4.0),
            scored("Z", 0.0),
            scored("Y", 0.0),
            scored("Y", 2.0),
        ]);
        assert_eq!(summary(&board), vec![("B", 4.0), ("Y", 2.0), ("Z", 0.0)]);
        assert_eq!(board[2].avatar_url.as_deref(), Some("z.png"));
    }

    #[test]
    fn test_include_unscored_lists_each_reader_once() {
        let names = ["r0", "r1", "r2", "r3", "r4"];
        let comments: Vec<AnnotatedComment> = (0..2_000)
            .map(|i| scored(names[i % names.len()], 0.0))
            .chain(std::iter::once(scored("r3", 1.0)))
            .collect();

        let board = LeaderboardBuilder::new().include_unscored(true).build(&comments);
        assert_eq!(
            summary(&board),
            vec![("r3", 1.0), ("r0", 0.0), ("r1", 0.0), ("r2", 0.0), ("r4", 0.0)]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let comments = vec![
            Comment::new("a", "Total: 40"),
            Comment::new("b", "40 points"),
            Comment::new("a", "12 pts"),
            Comment::new("c", "= 3"),
        ];
        let first = build(&annotate(&comments));
        let second = build(&annotate(&comments));
        assert_eq!(first, second);
        assert_eq!(summary(&first), vec![("a", 40.0), ("b", 40.0), ("c", 3.0)]);
    }
}
