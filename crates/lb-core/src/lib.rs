//! lb-core - Core library for leaderboard
//!
//! This crate provides the business logic for ranking readers by the points
//! they report in comments: points extraction, comment annotation,
//! leaderboard building, reply collection, caching and export.

pub mod error;
pub mod types;
pub mod config;
pub mod points;
pub mod comment;
pub mod leaderboard;
pub mod replies;
pub mod cache;
pub mod export;

pub use error::{LeaderboardError, Result};
pub use types::*;
