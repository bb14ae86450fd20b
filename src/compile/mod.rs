//! Story compiler: history → snapshots → merged tree → interned story.
//!
//! The pipeline, per commit and strictly in chronological order:
//!
//! - **snapshot**: parse the commit's blob and annotate every node `[Added]`.
//! - **merge**: fold the snapshot into the accumulated tree ([`merge`]).
//! - **moves**: when the document's path changed, record `Moved` on the root.
//!
//! After the last commit, [`intern`] turns commit ids into newest-first
//! indices and deduplicates authors.
//!
//! Parse failures are collected into [`Story::errors`] and never abort the
//! fold; only a path without any history (or unreadable content) is fatal.

mod fold;
mod intern;
mod merge;
mod snapshot;

use std::fmt;

use docstory_git::{BlobStore, DEFAULT_HISTORY_LIMIT, GitError, HistoryProvider};
use tracing::{info, instrument};

pub use fold::{Fold, fold};
pub use merge::merge;
pub use snapshot::snapshot;

use crate::error::StoryError;
use crate::parser::{DefaultParser, DocumentParser};
use crate::story::Story;

/// Options for [`compile`].
pub struct CompileOptions {
    /// Maximum number of commits requested from the history provider.
    pub limit: usize,
    parser: Box<dyn DocumentParser>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
            parser: Box::new(DefaultParser::default()),
        }
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl CompileOptions {
    /// Stop enumerating history after `limit` commits.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replace the default JSON/YAML parser.
    #[must_use]
    pub fn with_parser(mut self, parser: impl DocumentParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// The parser used for every commit.
    #[must_use]
    pub fn parser(&self) -> &dyn DocumentParser {
        self.parser.as_ref()
    }
}

/// Compile the story of `path` in `repo`.
///
/// # Errors
/// - [`StoryError::NotFound`] if the path has no history within
///   `options.limit`.
/// - [`StoryError::Git`] if history or content cannot be read.
#[instrument(skip(repo, options), fields(limit = options.limit))]
pub fn compile<R>(repo: &R, path: &str, options: &CompileOptions) -> Result<Story, StoryError>
where
    R: HistoryProvider + BlobStore,
{
    let mut commits = match repo.file_history(path, options.limit) {
        Ok(commits) => commits,
        Err(GitError::NotFound { .. }) => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    // Providers report newest first; the fold needs oldest first.
    commits.reverse();

    let story = fold(path, commits, repo, options.parser())?;
    info!(
        path = %story.path,
        commits = story.commits.len(),
        errors = story.errors.len(),
        "story compiled"
    );
    Ok(story)
}
