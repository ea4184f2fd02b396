//! Decode, collect replies, annotate, rank and export in one pass

use lb_core::cache::{CacheFile, LeaderboardCache, RefreshPolicy};
use lb_core::comment::{decode_replies, decode_top_level, Comment, CommentAnnotator};
use lb_core::error::Result;
use lb_core::export::ExportManager;
use lb_core::leaderboard::{Leaderboard, LeaderboardBuilder};
use lb_core::replies::{ReplyCollector, ReplySource};
use lb_core::types::{CommentId, ContentDigest};
use pretty_assertions::assert_eq;
use std::time::Duration;

const PAGE: &str = r#"{
    "comments": [
        {
            "user": {"name": "Alice", "avatar": "a.png"},
            "text": "Finished both books!\r\nTotal points for September: 120",
            "replyCount": 1,
            "commentId": {"resourceId": "c1"}
        },
        {
            "user": {"name": "Bob", "avatar": "b.png"},
            "text": "3 points for the quiz",
            "replyCount": 1,
            "commentId": {"resourceId": "c2"}
        },
        {
            "user": {"name": "", "avatar": "x.png"},
            "text": "500 points"
        }
    ]
}"#;

struct StaticReplies;

impl ReplySource for StaticReplies {
    fn fetch_replies(&self, parent: &Comment) -> Result<Vec<Comment>> {
        let page = match parent.comment_id.as_str() {
            "c1" => r#"{"comments": [{"user": {"name": "Bob", "avatar": "b2.png"}, "text": "Reading: 40\nReview: 5\n= 45"}]}"#,
            _ => r#"{"comments": []}"#,
        };
        decode_replies(page, &parent.comment_id)
    }
}

fn ranked() -> Leaderboard {
    let comments = decode_top_level(PAGE).unwrap();
    let all = ReplyCollector::new(StaticReplies)
        .with_delay(Duration::ZERO)
        .collect(comments);
    assert_eq!(all.len(), 4);
    assert_eq!(all[3].parent_comment, Some(CommentId::from_string("c1")));

    let annotated = CommentAnnotator::new().annotate_owned(all);
    Leaderboard::new(LeaderboardBuilder::new().build(&annotated))
}

#[test]
fn test_pipeline_ranks_readers() {
    let board = ranked();
    let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(board.entries[0].points, 120.0);
    assert_eq!(board.entries[1].points, 45.0);
    assert_eq!(board.entries[1].avatar_url.as_deref(), Some("b2.png"));
}

#[test]
fn test_pipeline_exports_text() {
    let output = ExportManager::new().export(&ranked(), "text").unwrap();
    assert_eq!(output, "1. Alice: 120 points\n2. Bob: 45 points\n");
}

#[test]
fn test_pipeline_cache_survives_serialization() {
    let board = ranked();
    let cache = LeaderboardCache::new(board.entries.clone())
        .with_digest(ContentDigest::of_bytes(PAGE.as_bytes()));

    let json = serde_json::to_string(&CacheFile::new(cache.clone())).unwrap();
    let restored: CacheFile = serde_json::from_str(&json).unwrap();
    let restored = restored.into_cache().unwrap();

    assert_eq!(restored, cache);
    assert!(restored.matches_digest(&ContentDigest::of_bytes(PAGE.as_bytes())));
    assert!(!RefreshPolicy::default().needs_refresh(Some(&restored), restored.fetched_at, false));
}
