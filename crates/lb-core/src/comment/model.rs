//! Comment data models

use crate::types::CommentId;
use serde::{Deserialize, Deserializer, Serialize};

/// A reader's comment, as delivered by the comments source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Display name of the author, the leaderboard key
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Avatar reference, passed through untouched
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar: String,
    /// Comment body
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    /// Number of replies the source reports for this comment
    #[serde(default)]
    pub reply_count: u32,
    /// Source-assigned identifier
    #[serde(default)]
    pub comment_id: CommentId,
    /// Whether this comment is a reply to another one
    #[serde(default)]
    pub is_reply: bool,
    /// Parent comment, for replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment: Option<CommentId>,
}

impl Comment {
    /// Create a top-level comment
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the avatar
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    /// Set the comment id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.comment_id = CommentId::from_string(id);
        self
    }

    /// Set the reported reply count
    pub fn with_reply_count(mut self, count: u32) -> Self {
        self.reply_count = count;
        self
    }

    /// Turn this comment into a reply to `parent`
    pub fn into_reply_of(mut self, parent: &CommentId) -> Self {
        self.is_reply = true;
        self.reply_count = 0;
        self.parent_comment = Some(parent.clone());
        self
    }

    /// Whether the author name is present
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Whether the source reports replies that can be looked up
    pub fn has_replies(&self) -> bool {
        self.reply_count > 0
    }

    /// First `max_chars` characters of the text, for log lines
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

/// A comment together with the points found in its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedComment {
    /// The original comment
    #[serde(flatten)]
    pub comment: Comment,
    /// Points found, 0 when none were found
    pub points: f64,
    /// Whether the text contained a points value
    pub points_found: bool,
}

impl AnnotatedComment {
    /// Author name
    pub fn name(&self) -> &str {
        &self.comment.name
    }

    /// Author avatar
    pub fn avatar(&self) -> &str {
        &self.comment.avatar
    }
}

/// Treat JSON `null` like a missing string
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
