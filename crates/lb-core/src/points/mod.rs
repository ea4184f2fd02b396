//! Points extraction
//!
//! Finds the point total a reader reports in a free-form comment. Each
//! notation people use is recognised by its own [`PointsMatcher`]; the
//! [`PointsExtractor`] runs every matcher over the text and keeps the
//! largest eligible value via [`select_max`].
//!
//! Taking the maximum picks the grand total when a comment also lists
//! per-book subtotals or running sums. It is a heuristic: a comment that
//! mentions an unrelated, larger number of points ("won 9999 points in a
//! contest") is scored with that number.
//!
//! # Example
//!
//! ```
//! use lb_core::points::extract_max_points;
//!
//! let result = extract_max_points("Book 1: 131 points\nBook 2: 71 points\n= 202");
//! assert!(result.found);
//! assert_eq!(result.max_points, 202.0);
//! ```

mod extractor;
mod matchers;

pub use extractor::{
    extract_max_points, extract_max_points_opt, select_max, PointsExtractor, PointsResult,
};
pub use matchers::{Candidate, DirectMention, PointsMatcher, StandaloneEquals, SummaryTotal};
