//! Attach points to comments

use super::model::{AnnotatedComment, Comment};
use crate::points::{extract_max_points, PointsExtractor, PointsResult};
use tracing::debug;

/// Annotates comments using a configurable extractor
#[derive(Debug, Default)]
pub struct CommentAnnotator {
    extractor: PointsExtractor,
}

impl CommentAnnotator {
    /// Create an annotator with the built-in notations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator around a custom extractor
    pub fn with_extractor(extractor: PointsExtractor) -> Self {
        Self { extractor }
    }

    /// Annotate a single comment
    pub fn annotate_one(&self, comment: Comment) -> AnnotatedComment {
        let result = self.extractor.extract(&comment.text);
        attach(comment, result)
    }

    /// Annotate comments, preserving order and count
    pub fn annotate(&self, comments: &[Comment]) -> Vec<AnnotatedComment> {
        comments
            .iter()
            .cloned()
            .map(|c| self.annotate_one(c))
            .collect()
    }

    /// Annotate comments, consuming them
    pub fn annotate_owned(&self, comments: Vec<Comment>) -> Vec<AnnotatedComment> {
        let annotated: Vec<_> = comments
            .into_iter()
            .map(|c| self.annotate_one(c))
            .collect();
        debug!(
            total = annotated.len(),
            with_points = annotated.iter().filter(|c| c.points_found).count(),
            "Annotated comments"
        );
        annotated
    }
}

fn attach(comment: Comment, result: PointsResult) -> AnnotatedComment {
    AnnotatedComment {
        comment,
        points: if result.found { result.max_points } else { 0.0 },
        points_found: result.found,
    }
}

/// Annotate comments with the built-in notations
pub fn annotate(comments: &[Comment]) -> Vec<AnnotatedComment> {
    comments
        .iter()
        .map(|c| attach(c.clone(), extract_max_points(&c.text)))
        .collect()
}

/// Annotate owned comments with the built-in notations
pub fn annotate_owned(comments: Vec<Comment>) -> Vec<AnnotatedComment> {
    comments
        .into_iter()
        .map(|c| {
            let result = extract_max_points(&c.text);
            attach(c, result)
        })
        .collect()
}
