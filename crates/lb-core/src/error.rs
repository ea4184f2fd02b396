//! Error types for leaderboard

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for leaderboard
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No cached leaderboard at the given location
    #[error("Cache not found: {0}")]
    CacheNotFound(PathBuf),

    /// Comment payload did not have the expected shape
    #[error("Invalid comment payload: {0}")]
    InvalidPayload(String),

    /// Unsupported cache schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(String),

    /// Reply source failed for one parent comment
    #[error("Failed to fetch replies for comment {comment_id}: {message}")]
    ReplyFetch { comment_id: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LeaderboardError>,
    },
}

impl LeaderboardError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LeaderboardError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for LeaderboardError {
    fn from(err: toml::de::Error) -> Self {
        LeaderboardError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for LeaderboardError {
    fn from(err: toml::ser::Error) -> Self {
        LeaderboardError::Toml(err.to_string())
    }
}

/// Result type alias for leaderboard
pub type Result<T> = std::result::Result<T, LeaderboardError>;
