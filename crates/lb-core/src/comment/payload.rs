//! Decoding of comment API dumps
//!
//! The comments API returns pages shaped like
//! `{"comments": [{"user": {"name", "avatar"}, "text", "replyCount",
//! "commentId": {"resourceId"}}]}`. Fetching those pages is somebody else's
//! job; this module only turns a saved page into [`Comment`] records. A
//! plain JSON array of `Comment` records is accepted as well.

use super::model::Comment;
use crate::error::{LeaderboardError, Result};
use crate::types::CommentId;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ApiPage {
    comments: Option<Vec<ApiComment>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiComment {
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    reply_count: Option<u32>,
    #[serde(default)]
    comment_id: Option<ApiResourceId>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUser {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResourceId {
    #[serde(default)]
    resource_id: Option<String>,
}

impl ApiComment {
    fn into_comment(self) -> Comment {
        let user = self.user.unwrap_or_default();
        Comment {
            name: user.name.unwrap_or_default(),
            avatar: user.avatar.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
            reply_count: self.reply_count.unwrap_or(0),
            comment_id: CommentId(
                self.comment_id
                    .and_then(|id| id.resource_id)
                    .unwrap_or_default(),
            ),
            is_reply: false,
            parent_comment: None,
        }
    }
}

fn page_comments(value: Value) -> Result<Vec<ApiComment>> {
    let page: ApiPage = serde_json::from_value(value)?;
    page.comments.ok_or_else(|| {
        LeaderboardError::InvalidPayload("expected a \"comments\" array".to_string())
    })
}

/// Decode a page of top-level comments
pub fn decode_top_level(json: &str) -> Result<Vec<Comment>> {
    let value: Value = serde_json::from_str(json)?;
    Ok(page_comments(value)?
        .into_iter()
        .map(ApiComment::into_comment)
        .collect())
}

/// Decode a page of replies to `parent`
///
/// Replies never report nested replies of their own.
pub fn decode_replies(json: &str, parent: &CommentId) -> Result<Vec<Comment>> {
    Ok(decode_comments(json)?
        .into_iter()
        .map(|c| c.into_reply_of(parent))
        .collect())
}

/// Decode either an API page or a plain array of comment records
pub fn decode_comments(json: &str) -> Result<Vec<Comment>> {
    let value: Value = serde_json::from_str(json)?;
    let is_page = matches!(&value, Value::Object(map) if map.contains_key("comments"));

    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else if is_page {
        Ok(page_comments(value)?
            .into_iter()
            .map(ApiComment::into_comment)
            .collect())
    } else {
        Err(LeaderboardError::InvalidPayload(format!(
            "expected a comment array or an object with \"comments\", got {}",
            json_kind(&value)
        )))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
