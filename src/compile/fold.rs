//! The fold: apply commits one at a time, oldest first.

use docstory_git::{BlobStore, CommitEntry};
use tracing::{debug, warn};

use super::intern::{CommitArena, intern_authors, intern_commits};
use super::merge::merge;
use super::snapshot::snapshot;
use crate::error::StoryError;
use crate::parser::{DocumentParser, ParseError};
use crate::story::{CommitId, Event, PARSE_ERROR_CODE, ParseFailure, Story, StoryNode};

/// Accumulated state of a compile in progress.
pub struct Fold<'a> {
    blobs: &'a dyn BlobStore,
    parser: &'a dyn DocumentParser,
    arena: CommitArena,
    tree: Option<StoryNode<CommitId>>,
    errors: Vec<ParseFailure<CommitId>>,
    path: Option<String>,
}

impl<'a> Fold<'a> {
    pub fn new(blobs: &'a dyn BlobStore, parser: &'a dyn DocumentParser) -> Self {
        Self {
            blobs,
            parser,
            arena: CommitArena::default(),
            tree: None,
            errors: Vec::new(),
            path: None,
        }
    }

    /// Apply one commit. Commits must arrive in chronological order.
    ///
    /// A parse failure is recorded and leaves the tree untouched; only a
    /// failure to read the blob aborts.
    ///
    /// # Errors
    /// Returns [`StoryError::Git`] if the commit's content cannot be read.
    pub fn step(&mut self, entry: CommitEntry) -> Result<(), StoryError> {
        let content = self.blobs.read_blob(entry.blob)?;
        let parsed = self.parser.parse(&entry.path, &content);
        let path = entry.path.clone();
        let sha = entry.oid;
        let commit = self.arena.push(entry);

        match parsed {
            Ok(value) => {
                let next = snapshot(value, commit);
                self.tree = Some(match self.tree.take() {
                    Some(mut tree) => {
                        merge(&mut tree, next);
                        tree
                    }
                    None => next,
                });
                debug!(%sha, %path, "folded commit");
            }
            Err(err) => {
                warn!(%sha, %path, error = %err, "commit content did not parse, keeping previous state");
                self.errors.push(parse_failure(commit, &sha.to_string(), &err));
            }
        }

        let previous = self.path.replace(path);
        if let Some(old_path) = previous.filter(|old| Some(old) != self.path.as_ref()) {
            let Some(tree) = self.tree.as_mut() else {
                debug!(%sha, from = %old_path, "moved before any version parsed, move not recorded");
                return Ok(());
            };
            debug!(%sha, from = %old_path, "document moved");
            tree.history_mut().push(Event::Moved { commit, old_path });
        }
        Ok(())
    }

    /// Run the interning passes and produce the final story.
    pub fn finish(self, queried_path: &str) -> Story {
        let interned = intern_commits(&self.arena, self.tree, self.errors);
        let (commits, authors) = intern_authors(interned.commits);
        Story {
            path: self.path.unwrap_or_else(|| queried_path.to_owned()),
            tree: interned.tree,
            commits,
            authors,
            errors: interned.errors,
        }
    }
}

fn parse_failure(commit: CommitId, sha: &str, err: &ParseError) -> ParseFailure<CommitId> {
    ParseFailure {
        commit,
        code: PARSE_ERROR_CODE,
        message: format!("{err} at commit {sha}"),
        cause: err.cause_chain(),
    }
}

/// Fold `commits` (oldest first) into a story for `path`.
///
/// # Errors
/// Returns [`StoryError::NotFound`] if `commits` is empty, and
/// [`StoryError::Git`] if any commit's content cannot be read.
pub fn fold(
    path: &str,
    commits: Vec<CommitEntry>,
    blobs: &dyn BlobStore,
    parser: &dyn DocumentParser,
) -> Result<Story, StoryError> {
    if commits.is_empty() {
        return Err(StoryError::NotFound {
            path: path.to_owned(),
        });
    }
    let mut state = Fold::new(blobs, parser);
    for entry in commits {
        state.step(entry)?;
    }
    Ok(state.finish(path))
}
