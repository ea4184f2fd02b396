//! Export functionality for leaderboards
//!
//! This module provides exporters for turning a ranked leaderboard into
//! output for other tools or for people.
//!
//! # Overview
//!
//! Export functionality supports:
//! - JSON API envelope (pretty-printed and compact)
//! - Markdown table
//! - Plain text ranking
//!
//! # Example
//!
//! ```ignore
//! use lb_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let json = manager.export(&board, "json")?;
//! let md = manager.export(&board, "markdown")?;
//! ```

mod exporter;
mod json;
mod markdown;
mod text;

pub use exporter::{ExportManager, Exporter};
pub use json::{ApiResponse, JsonExporter};
pub use markdown::MarkdownExporter;
pub use text::TextExporter;
