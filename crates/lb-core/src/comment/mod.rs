//! Comment system module
//!
//! Holds the comment records the leaderboard is built from, decodes them
//! from comment API dumps, and annotates them with the points they report.

pub mod model;
pub mod annotate;
pub mod payload;

pub use model::*;
pub use annotate::{annotate, annotate_owned, CommentAnnotator};
pub use payload::{decode_comments, decode_replies, decode_top_level};
