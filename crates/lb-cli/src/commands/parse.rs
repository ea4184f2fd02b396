//! Parse command
//!
//! Show what a single comment is worth.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::Read;

use lb_core::points::{Candidate, PointsExtractor, PointsResult};
use lb_core::types::format_points;

/// Arguments for the parse command
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Comment text (read from stdin if omitted)
    pub text: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// List every value each matcher found
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseReport {
    #[serde(flatten)]
    result: PointsResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<CandidateReport>>,
}

#[derive(Debug, Serialize)]
struct CandidateReport {
    matcher: &'static str,
    value: f64,
    start: usize,
    end: usize,
}

impl From<&Candidate> for CandidateReport {
    fn from(c: &Candidate) -> Self {
        Self {
            matcher: c.matcher,
            value: c.value,
            start: c.start,
            end: c.end,
        }
    }
}

/// Execute the parse command
pub fn execute(args: ParseArgs) -> Result<()> {
    use colored::Colorize;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read comment text from stdin")?;
            buf
        }
    };
    let text = text.replace("\r\n", "\n");

    let extractor = PointsExtractor::new();
    let result = extractor.extract(&text);
    let candidates = args.explain.then(|| extractor.candidates(&text));

    if args.json {
        let report = ParseReport {
            result,
            candidates: candidates
                .as_ref()
                .map(|list| list.iter().map(CandidateReport::from).collect()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if result.found {
        println!(
            "{} {} points",
            "✓".green(),
            format_points(result.max_points).yellow().bold()
        );
    } else {
        println!("{} No points found", "✗".red());
    }

    if let Some(candidates) = candidates {
        println!();
        if candidates.is_empty() {
            println!("{}", "No candidate values.".dimmed());
        }
        for candidate in &candidates {
            let snippet = text.get(candidate.start..candidate.end).unwrap_or_default();
            println!(
                "  {:<8} {:>8}  {}",
                candidate.matcher.cyan(),
                format_points(candidate.value),
                snippet.trim().replace('\n', " ").dimmed()
            );
        }
    }

    Ok(())
}
