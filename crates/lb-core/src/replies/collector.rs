//! Sequential reply collector

use crate::comment::Comment;
use crate::error::Result;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default pause between reply requests
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(300);

/// Something that can list the replies to a comment
pub trait ReplySource {
    /// Replies to `parent`, in source order
    fn fetch_replies(&self, parent: &Comment) -> Result<Vec<Comment>>;
}

impl<S: ReplySource + ?Sized> ReplySource for &S {
    fn fetch_replies(&self, parent: &Comment) -> Result<Vec<Comment>> {
        (**self).fetch_replies(parent)
    }
}

/// Counters from one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Parents whose replies were requested
    pub queried: usize,
    /// Parents with replies but no id to look them up by
    pub skipped: usize,
    /// Requests that failed
    pub failed: usize,
    /// Replies added
    pub replies: usize,
}

/// Expands a list of comments with their replies
pub struct ReplyCollector<S> {
    source: S,
    delay: Duration,
}

impl<S: ReplySource> ReplyCollector<S> {
    /// Create a collector with the default delay
    pub fn new(source: S) -> Self {
        Self {
            source,
            delay: DEFAULT_REPLY_DELAY,
        }
    }

    /// Set the pause after each successful request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Original comments followed by the replies of each parent, in parent order
    pub fn collect(&self, comments: Vec<Comment>) -> Vec<Comment> {
        self.collect_with_stats(comments).0
    }

    /// Like [`collect`](Self::collect), also reporting what happened
    pub fn collect_with_stats(&self, comments: Vec<Comment>) -> (Vec<Comment>, CollectStats) {
        let mut stats = CollectStats::default();
        let mut replies: Vec<Comment> = Vec::new();

        let parents: Vec<&Comment> = comments.iter().filter(|c| c.has_replies()).collect();
        info!("Fetching replies for {} comments...", parents.len());

        for parent in parents {
            if parent.comment_id.is_empty() {
                info!(
                    "Skipping comment without commentId: {}",
                    parent.preview(50)
                );
                stats.skipped += 1;
                continue;
            }

            debug!(
                "Fetching replies for comment by {} ({} replies)",
                parent.name, parent.reply_count
            );
            stats.queried += 1;

            match self.source.fetch_replies(parent) {
                Ok(found) => {
                    debug!("Found {} replies", found.len());
                    stats.replies += found.len();
                    replies.extend(
                        found
                            .into_iter()
                            .map(|r| r.into_reply_of(&parent.comment_id)),
                    );
                    if !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                }
                Err(e) => {
                    warn!(
                        "Error fetching replies for comment {}: {}",
                        parent.comment_id, e
                    );
                    stats.failed += 1;
                }
            }
        }

        let mut all = comments;
        all.extend(replies);
        info!("Total comments after fetching replies: {}", all.len());
        (all, stats)
    }
}
