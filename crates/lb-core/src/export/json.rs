//! JSON exporter for leaderboards

use super::exporter::Exporter;
use crate::error::Result;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use serde::{Deserialize, Serialize};

/// JSON exporter with compact mode support
pub struct JsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
    /// Format name
    name: String,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new(compact: bool) -> Self {
        Self {
            pretty: !compact,
            name: if compact {
                "json-compact".to_string()
            } else {
                "json".to_string()
            },
        }
    }

    /// Create a compact JSON exporter
    pub fn compact() -> Self {
        Self::new(true)
    }

    /// Create a pretty-printed JSON exporter
    pub fn pretty() -> Self {
        Self::new(false)
    }
}

impl Exporter for JsonExporter {
    fn export(&self, board: &Leaderboard) -> Result<String> {
        let response = ApiResponse::success(board);

        let json = if self.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };

        Ok(json)
    }

    fn format_name(&self) -> &str {
        &self.name
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Envelope consumed by the leaderboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the leaderboard could be produced
    pub success: bool,
    /// Ranked entries, empty on failure
    pub data: Vec<LeaderboardEntry>,
    /// Unix timestamp in milliseconds of when the data was built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying the leaderboard
    pub fn success(board: &Leaderboard) -> Self {
        Self {
            success: true,
            data: board.entries.clone(),
            timestamp: Some(board.generated_at.timestamp_millis()),
            error: None,
        }
    }

    /// Failed response with an empty data list
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            timestamp: None,
            error: Some(message.into()),
        }
    }
}
