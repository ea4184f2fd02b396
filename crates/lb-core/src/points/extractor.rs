//! Matcher union and maximum selection

use super::matchers::{Candidate, DirectMention, PointsMatcher, StandaloneEquals, SummaryTotal};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::trace;

static DEFAULT_EXTRACTOR: LazyLock<PointsExtractor> = LazyLock::new(PointsExtractor::new);

/// Outcome of scanning one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointsResult {
    /// Largest eligible value, 0 when nothing was found
    #[serde(rename = "maxPoints")]
    pub max_points: f64,
    /// Whether any eligible value was found
    #[serde(rename = "pointsFound")]
    pub found: bool,
}

impl PointsResult {
    /// Result for a text without any eligible value
    pub const fn not_found() -> Self {
        Self {
            max_points: 0.0,
            found: false,
        }
    }

    /// Result for a found value
    pub const fn found(max_points: f64) -> Self {
        Self {
            max_points,
            found: true,
        }
    }
}

impl Default for PointsResult {
    fn default() -> Self {
        Self::not_found()
    }
}

/// Keep the largest strictly positive, non-NaN value
pub fn select_max(values: impl IntoIterator<Item = f64>) -> PointsResult {
    values
        .into_iter()
        .filter(|v| !v.is_nan() && *v > 0.0)
        .fold(PointsResult::not_found(), |best, v| {
            if !best.found || v > best.max_points {
                PointsResult::found(v)
            } else {
                best
            }
        })
}

/// Runs a set of matchers over a text and reports the maximum
pub struct PointsExtractor {
    matchers: Vec<Box<dyn PointsMatcher>>,
}

impl PointsExtractor {
    /// Create an extractor with the built-in notations
    pub fn new() -> Self {
        Self::empty()
            .with_matcher(DirectMention)
            .with_matcher(SummaryTotal)
            .with_matcher(StandaloneEquals)
    }

    /// Create an extractor without any matchers
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Add a matcher
    pub fn with_matcher(mut self, matcher: impl PointsMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Names of the registered matchers, in order
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Every candidate found by every matcher, ordered by position
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let text = normalize_line_endings(text);
        let mut all: Vec<Candidate> = self
            .matchers
            .iter()
            .flat_map(|m| m.candidates(&text))
            .collect();
        all.sort_by_key(|c| c.start);
        all
    }

    /// Scan `text` and report the largest eligible value
    pub fn extract(&self, text: &str) -> PointsResult {
        if text.is_empty() {
            return PointsResult::not_found();
        }

        let candidates = self.candidates(text);
        let result = select_max(candidates.iter().map(|c| c.value));
        trace!(
            candidates = candidates.len(),
            found = result.found,
            max = result.max_points,
            "Scanned text for points"
        );
        result
    }

    /// Like [`extract`](Self::extract), treating `None` as empty text
    pub fn extract_opt(&self, text: Option<&str>) -> PointsResult {
        text.map_or_else(PointsResult::not_found, |t| self.extract(t))
    }
}

impl Default for PointsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PointsExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointsExtractor")
            .field("matchers", &self.matcher_names())
            .finish()
    }
}

/// CRLF and lone CR become LF so line anchors behave the same everywhere
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Scan `text` with the built-in notations
pub fn extract_max_points(text: &str) -> PointsResult {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Scan possibly absent text with the built-in notations
pub fn extract_max_points_opt(text: Option<&str>) -> PointsResult {
    DEFAULT_EXTRACTOR.extract_opt(text)
}
