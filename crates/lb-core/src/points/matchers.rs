//! Individual point notations

#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// A number followed by `point`, `points`, `pt` or `pts` as a whole word.
static DIRECT_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]+(?:\.[0-9]+)?)\s*(?:points?|pts?)\b").expect("DIRECT_MENTION regex")
});

/// `final`/`total`, an optional `points` and `for ...` qualifier, one or more
/// segments ending in `:` or `=`, then the number that ends the sentence,
/// line or text.
static SUMMARY_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:final|total)(?:\s+points?)?(?:\s+for\b[^.\n:=]*)?(?:[^.\n]*?[:=]\s*)+([0-9]+(?:\.[0-9]+)?)(?:[.\n]|$)",
    )
    .expect("SUMMARY_TOTAL regex")
});

/// A line holding nothing but `=` and a number.
static STANDALONE_EQUALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*=\s*([0-9]+(?:\.[0-9]+)?)\s*$").expect("STANDALONE_EQUALS regex")
});

/// A numeric value found by a matcher
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Name of the matcher that produced it
    pub matcher: &'static str,
    /// Parsed value (not yet checked for eligibility)
    pub value: f64,
    /// Byte offset of the whole match
    pub start: usize,
    /// Byte offset just past the whole match
    pub end: usize,
}

/// A single way of writing down a points value
pub trait PointsMatcher: Send + Sync {
    /// Short name used in logs and explanations
    fn name(&self) -> &'static str;

    /// All values this notation finds in `text`, in text order
    fn candidates(&self, text: &str) -> Vec<Candidate>;
}

/// Collect the first capture group of every match of `pattern`
fn capture_values(name: &'static str, pattern: &Regex, text: &str) -> Vec<Candidate> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
            Some(Candidate {
                matcher: name,
                value,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// "42 points", "75pt", "63 pts"
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMention;

impl PointsMatcher for DirectMention {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        capture_values(self.name(), &DIRECT_MENTION, text)
    }
}

/// "Total points for August: 1634", "Final: 50", "total : 192+12+132+80 : 416"
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryTotal;

impl PointsMatcher for SummaryTotal {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        capture_values(self.name(), &SUMMARY_TOTAL, text)
    }
}

/// A line reading "= 202"
#[derive(Debug, Clone, Copy, Default)]
pub struct StandaloneEquals;

impl PointsMatcher for StandaloneEquals {
    fn name(&self) -> &'static str {
        "equals"
    }

    fn candidates(&self, text: &str) -> Vec<Candidate> {
        capture_values(self.name(), &STANDALONE_EQUALS, text)
    }
}
