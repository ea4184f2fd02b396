//! lb-storage - Storage library for leaderboard
//!
//! This crate provides the file system cache for built leaderboards and a
//! reply source backed by saved API dumps.

mod cache_store;
mod reply_dir;

pub use cache_store::FileSystemStorage;
pub use reply_dir::DirectoryReplySource;
