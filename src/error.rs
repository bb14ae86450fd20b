//! Fatal errors from compiling a story.
//!
//! Per-commit parse problems are *not* errors at this level: they are
//! recorded in [`Story::errors`](crate::Story::errors) and the fold carries
//! on. A [`StoryError`] means no story could be produced at all.

use docstory_git::GitError;
use thiserror::Error;

/// Errors that abort a compile.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The path has no history, or the commit limit excludes all of it.
    #[error("ENOENT: file does not exist in repository '{path}'")]
    NotFound {
        /// The path that was queried.
        path: String,
    },

    /// Reading history or content from the repository failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

impl StoryError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ENOENT",
            Self::Git(_) => "EGIT",
        }
    }
}
