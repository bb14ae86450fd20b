//! Shared test helpers for docstory integration tests.
//!
//! [`MemoryRepo`] is an in-memory history provider and blob store: tests
//! script a sequence of commits and compile against it without touching git.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use docstory_git::{BlobStore, CommitEntry, GitError, GitOid, HistoryProvider, Signature};

/// Default author for scripted commits.
pub const AUTHOR: (&str, &str) = ("Martin Heidegger", "martin.heidegger@gmail.com");

/// A scripted repository: commits are appended oldest first and reported
/// newest first, like a real history walk.
#[derive(Default)]
pub struct MemoryRepo {
    commits: Vec<CommitEntry>,
    blobs: HashMap<GitOid, Vec<u8>>,
    next_id: u8,
    /// Number of `file_history` calls, to check requests stop at the limit.
    pub history_calls: Cell<usize>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_oid(&mut self) -> GitOid {
        self.next_id += 1;
        GitOid::from_bytes([self.next_id; 20])
    }

    /// Commit `content` at `path` with the default author.
    pub fn commit(&mut self, path: &str, content: &str, time: i64) -> GitOid {
        self.commit_by(path, content, time, AUTHOR, AUTHOR)
    }

    /// Commit `content` at `path` with explicit author and committer.
    pub fn commit_by(
        &mut self,
        path: &str,
        content: &str,
        time: i64,
        author: (&str, &str),
        committer: (&str, &str),
    ) -> GitOid {
        let oid = self.fresh_oid();
        let blob = self.fresh_oid();
        self.blobs.insert(blob, content.as_bytes().to_vec());
        self.commits.push(CommitEntry {
            oid,
            time,
            message: format!("commit {time}\n"),
            author: Signature::new(author.0, author.1),
            committer: Signature::new(committer.0, committer.1),
            path: path.to_owned(),
            blob,
        });
        oid
    }

    /// Drop a commit's blob so reading it fails.
    pub fn lose_blob(&mut self, commit: GitOid) {
        if let Some(entry) = self.commits.iter().find(|c| c.oid == commit) {
            self.blobs.remove(&entry.blob);
        }
    }
}

impl HistoryProvider for MemoryRepo {
    fn file_history(&self, path: &str, limit: usize) -> Result<Vec<CommitEntry>, GitError> {
        self.history_calls.set(self.history_calls.get() + 1);
        // The newest commit must carry the queried path; older ones may
        // carry earlier names of the same file.
        if self.commits.last().is_none_or(|c| c.path != path) {
            return Ok(Vec::new());
        }
        Ok(self.commits.iter().rev().take(limit).cloned().collect())
    }
}

impl BlobStore for MemoryRepo {
    fn read_blob(&self, oid: GitOid) -> Result<Vec<u8>, GitError> {
        self.blobs.get(&oid).cloned().ok_or_else(|| GitError::NotFound {
            message: format!("blob {oid}"),
        })
    }
}
