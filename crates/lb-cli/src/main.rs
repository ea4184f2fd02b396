//! leaderboard - Comment points leaderboard CLI
//!
//! Ranks readers by the highest points total they report in chapter comments.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build a leaderboard from a saved comments page
//! leaderboard build --comments comments.json
//!
//! # Include replies saved as <commentId>.json files
//! leaderboard build --comments comments.json --replies-dir replies/
//!
//! # Check what a single comment is worth
//! leaderboard parse "Total points for August: 1634"
//!
//! # When will the cached leaderboard be rebuilt?
//! leaderboard cache status
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
