//! Interning passes: replace commit and author references with dense indices.
//!
//! Run once, after the fold. Commit interning keeps only the commits some
//! event or parse failure actually refers to, ordered newest first. Author
//! interning then deduplicates the identities on those commits by email.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use docstory_git::{CommitEntry, Signature};

use crate::story::{CommitId, CommitRecord, Identity, ParseFailure, StoryNode};

/// Commits seen during a fold, addressable by [`CommitId`].
#[derive(Debug, Default)]
pub struct CommitArena {
    entries: Vec<CommitEntry>,
}

impl CommitArena {
    /// Take ownership of `entry` and hand out its synthetic id.
    pub fn push(&mut self, entry: CommitEntry) -> CommitId {
        let id = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        self.entries.push(entry);
        CommitId(id)
    }

    /// The commit behind `id`.
    pub fn get(&self, id: CommitId) -> Option<&CommitEntry> {
        self.entries.get(id.0 as usize)
    }

    fn time(&self, id: CommitId) -> i64 {
        self.get(id).map_or(i64::MIN, |entry| entry.time)
    }
}

/// Output of [`intern_commits`].
pub struct InternedCommits {
    pub tree: Option<StoryNode>,
    pub errors: Vec<ParseFailure>,
    /// Referenced commits, newest first; position is the interned index.
    pub commits: Vec<CommitEntry>,
}

/// Rewrite every commit reference in `tree` and `errors` to an index into a
/// newest-first table of the commits actually referenced.
///
/// Commits are collected in encounter order (tree first, each node's history
/// before its children, then errors) and stably sorted by time, so commits
/// sharing a timestamp keep their encounter order.
pub fn intern_commits(
    arena: &CommitArena,
    tree: Option<StoryNode<CommitId>>,
    errors: Vec<ParseFailure<CommitId>>,
) -> InternedCommits {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut note = |id: CommitId| {
        if seen.insert(id) {
            order.push(id);
        }
    };
    if let Some(tree) = &tree {
        tree.for_each_event(&mut |event| note(*event.commit()));
    }
    for failure in &errors {
        note(failure.commit);
    }

    order.sort_by(|a, b| arena.time(*b).cmp(&arena.time(*a)));

    let index: HashMap<CommitId, usize> = order
        .iter()
        .enumerate()
        .map(|(position, id)| (*id, position))
        .collect();
    let mut rewrite = |id: CommitId| index[&id];

    InternedCommits {
        tree: tree.map(|tree| tree.map_commits(&mut rewrite)),
        errors: errors
            .into_iter()
            .map(|failure| failure.map_commit(&mut rewrite))
            .collect(),
        commits: order
            .iter()
            .filter_map(|id| arena.get(*id).cloned())
            .collect(),
    }
}

/// Deduplicate authors and committers by email, in first-seen order, and
/// turn each commit into a [`CommitRecord`] that refers to them by index.
pub fn intern_authors(commits: Vec<CommitEntry>) -> (Vec<CommitRecord>, Vec<Identity>) {
    let mut authors: Vec<Identity> = Vec::new();
    let mut by_email: HashMap<String, usize> = HashMap::new();
    let mut intern = |signature: Signature| match by_email.entry(signature.email) {
        Entry::Occupied(slot) => *slot.get(),
        Entry::Vacant(slot) => {
            let index = authors.len();
            authors.push(Identity {
                name: signature.name,
                email: slot.key().clone(),
            });
            *slot.insert(index)
        }
    };

    let records = commits
        .into_iter()
        .map(|entry| {
            let author = intern(entry.author);
            let committer = intern(entry.committer);
            CommitRecord {
                time: entry.time,
                sha: entry.oid.to_string(),
                message: entry.message,
                author,
                committer,
            }
        })
        .collect();

    (records, authors)
}
