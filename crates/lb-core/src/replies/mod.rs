//! Reply collection
//!
//! Replies count toward the leaderboard like any other comment. How they are
//! fetched is up to a [`ReplySource`]; the [`ReplyCollector`] decides which
//! parents to ask about, paces the requests, and merges the results.

mod collector;

pub use collector::{CollectStats, ReplyCollector, ReplySource, DEFAULT_REPLY_DELAY};
