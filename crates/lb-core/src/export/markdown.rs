//! Markdown exporter for leaderboards

use super::exporter::Exporter;
use crate::error::Result;
use crate::leaderboard::Leaderboard;

/// Markdown table exporter
pub struct MarkdownExporter {
    /// Heading above the table
    title: Option<String>,
    /// Include the generation timestamp
    include_timestamp: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            title: None,
            include_timestamp: true,
        }
    }

    /// Set the heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set whether to include the generation timestamp
    pub fn with_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep names from breaking the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Exporter for MarkdownExporter {
    fn export(&self, board: &Leaderboard) -> Result<String> {
        let mut output = String::new();

        if let Some(ref title) = self.title {
            output.push_str(&format!("# {}\n\n", title));
        }
        if self.include_timestamp {
            output.push_str(&format!(
                "_Updated {}_\n\n",
                board.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        if board.is_empty() {
            output.push_str("No points reported yet.\n");
            return Ok(output);
        }

        output.push_str("| Rank | Name | Points |\n");
        output.push_str("|-----:|------|-------:|\n");
        for (rank, entry) in board.ranked() {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                rank,
                escape_cell(&entry.name),
                entry.display_points()
            ));
        }

        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}
