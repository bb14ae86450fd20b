//! The compiled story and its side tables.

use std::fmt;

use serde::Serialize;

use super::node::StoryNode;

/// Error code carried by every [`ParseFailure`].
pub const PARSE_ERROR_CODE: &str = "EPARSE";

/// Synthetic identity of a commit while a story is being compiled.
///
/// Assigned in fold order when the commit enters the compiler's arena, so two
/// commits never share an id even if their metadata is identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommitId(pub(crate) u32);

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An author or committer, deduplicated by email across a story.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// A commit referenced by the story, after interning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Commit time, seconds since the Unix epoch.
    pub time: i64,
    /// Full hex commit id.
    pub sha: String,
    /// The commit message.
    pub message: String,
    /// Index into [`Story::authors`].
    pub author: usize,
    /// Index into [`Story::authors`].
    pub committer: usize,
}

/// A commit whose content could not be parsed.
///
/// Recorded instead of aborting; the story tree keeps the state of the last
/// commit that did parse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseFailure<C = usize> {
    /// The commit whose content failed to parse.
    pub commit: C,
    /// Always [`PARSE_ERROR_CODE`].
    pub code: &'static str,
    /// What failed, naming the path and commit.
    pub message: String,
    /// The underlying parser error chain.
    pub cause: String,
}

impl<C> ParseFailure<C> {
    pub(crate) fn map_commit<D>(self, f: &mut impl FnMut(C) -> D) -> ParseFailure<D> {
        ParseFailure {
            commit: f(self.commit),
            code: self.code,
            message: self.message,
            cause: self.cause,
        }
    }
}

/// The per-field edit history of one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Story {
    /// Path of the document as of the most recent commit.
    pub path: String,
    /// The annotated tree; `None` if no commit ever parsed.
    pub tree: Option<StoryNode>,
    /// Every commit referenced by an event or error, newest first.
    pub commits: Vec<CommitRecord>,
    /// Authors and committers of [`Self::commits`], first-seen order.
    pub authors: Vec<Identity>,
    /// Commits that could not be parsed, in fold order.
    pub errors: Vec<ParseFailure>,
}

impl Story {
    /// Look up a live node by key path from the root.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&StoryNode> {
        self.tree.as_ref()?.get(path)
    }

    /// The commit an interned index refers to.
    #[must_use]
    pub fn commit(&self, index: usize) -> Option<&CommitRecord> {
        self.commits.get(index)
    }
}
