//! Plain text ranking

use super::exporter::Exporter;
use crate::error::Result;
use crate::leaderboard::Leaderboard;

/// One `rank. name: N points` line per entry
#[derive(Debug, Default)]
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for TextExporter {
    fn export(&self, board: &Leaderboard) -> Result<String> {
        Ok(board
            .ranked()
            .map(|(rank, entry)| {
                format!("{}. {}: {} points\n", rank, entry.name, entry.display_points())
            })
            .collect())
    }

    fn format_name(&self) -> &str {
        "text"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
