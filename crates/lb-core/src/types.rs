//! Core type definitions for leaderboard

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a comment as assigned by the comments API
///
/// May be empty when the source did not report one; such comments can still
/// be scored but cannot have their replies looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl CommentId {
    /// Create a CommentId from a string
    pub fn from_string(s: impl Into<String>) -> Self {
        CommentId(s.into())
    }

    /// Check whether the id is missing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommentId {
    fn from(s: &str) -> Self {
        CommentId(s.to_string())
    }
}

/// Content digest of a comment set, used to tell whether a cached
/// leaderboard was built from the same input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(pub String);

impl ContentDigest {
    /// Hash raw bytes
    pub fn of_bytes(bytes: &[u8]) -> Self {
        ContentDigest(blake3::hash(bytes).to_hex().to_string())
    }

    /// Short form for display
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

/// Incremental digest over several named inputs
///
/// Every field is hashed with its name and length, so moving bytes from one
/// field to the next changes the digest.
#[derive(Debug, Clone, Default)]
pub struct DigestBuilder {
    hasher: blake3::Hasher,
}

impl DigestBuilder {
    /// Start an empty digest
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named input
    pub fn field(&mut self, name: &str, bytes: &[u8]) -> &mut Self {
        for part in [name.as_bytes(), bytes] {
            self.hasher.update(&(part.len() as u64).to_le_bytes());
            self.hasher.update(part);
        }
        self
    }

    /// Add a named flag
    pub fn flag(&mut self, name: &str, value: bool) -> &mut Self {
        self.field(name, &[u8::from(value)])
    }

    /// Digest of everything added so far
    pub fn finish(&self) -> ContentDigest {
        ContentDigest(self.hasher.finalize().to_hex().to_string())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a points value the way people write it: integral values without
/// a fractional part, everything else as-is.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 && points.abs() < 1e15 {
        format!("{}", points as i64)
    } else {
        format!("{}", points)
    }
}
