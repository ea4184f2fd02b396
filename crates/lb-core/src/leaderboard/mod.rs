//! Leaderboard building
//!
//! Reduces annotated comments to one entry per reader, holding the highest
//! points that reader reported, ranked from most to fewest points.

mod builder;
mod entry;

pub use builder::{build, LeaderboardBuilder};
pub use entry::{Leaderboard, LeaderboardEntry};
