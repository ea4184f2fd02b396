//! Reply source backed by a directory of saved reply pages

use lb_core::comment::{decode_replies, Comment};
use lb_core::error::{LeaderboardError, Result};
use lb_core::replies::ReplySource;
use lb_core::types::DigestBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the replies to comment `X` from `<dir>/X.json`
///
/// Each file holds either a comments API page or a plain array of comment
/// records. A parent without a file has no replies.
#[derive(Debug, Clone)]
pub struct DirectoryReplySource {
    dir: PathBuf,
}

impl DirectoryReplySource {
    /// Create a source reading from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the pages are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the replies to `comment_id`
    pub fn page_path(&self, comment_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", comment_id))
    }

    /// Add every reply page, in file name order, to `digest`
    ///
    /// Returns the number of pages hashed. A missing directory hashes nothing.
    pub fn digest_pages(&self, digest: &mut DigestBuilder) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(LeaderboardError::Io(e)
                    .with_context(format!("reading reply directory {:?}", self.dir)))
            }
        };

        let mut pages: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
            .collect();
        pages.sort();

        for path in &pages {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            digest.field(&name, &fs::read(path)?);
        }

        debug!("Hashed {} reply pages in {:?}", pages.len(), self.dir);
        Ok(pages.len())
    }
}

impl ReplySource for DirectoryReplySource {
    fn fetch_replies(&self, parent: &Comment) -> Result<Vec<Comment>> {
        let id = parent.comment_id.as_str();
        if id.contains(|c: char| c == '/' || c == '\\') {
            return Err(LeaderboardError::ReplyFetch {
                comment_id: id.to_string(),
                message: "comment id is not a valid file name".to_string(),
            });
        }

        let path = self.page_path(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No reply page for comment {} at {:?}", id, path);
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(LeaderboardError::ReplyFetch {
                    comment_id: id.to_string(),
                    message: e.to_string(),
                })
            }
        };

        decode_replies(&json, &parent.comment_id)
            .map_err(|e| e.with_context(format!("decoding {:?}", path)))
    }
}
