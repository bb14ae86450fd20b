//! The [`HistoryProvider`] and [`BlobStore`] traits, the boundary between the
//! story compiler and git.
//!
//! Both traits are object-safe so callers can hold `&dyn HistoryProvider` or
//! `Box<dyn BlobStore>`. [`GixRepo`](crate::GixRepo) implements both; tests use
//! in-memory doubles.

use crate::error::GitError;
use crate::types::{CommitEntry, GitOid};

/// Default bound on the number of commits enumerated for one file.
///
/// `2^31 - 1`, the largest limit git itself accepts for a history walk.
pub const DEFAULT_HISTORY_LIMIT: usize = i32::MAX as usize;

/// Enumerates the commits that changed a single file.
pub trait HistoryProvider {
    /// Return the commits that changed `path`, newest first.
    ///
    /// Renames are followed: once the walk passes the commit that introduced
    /// `path` by renaming another file, older commits are reported under the
    /// old name (each [`CommitEntry::path`] is the path *as of* that commit).
    ///
    /// At most `limit` entries are returned. An empty vector means the path
    /// has no history within the limit; implementations do not treat that as
    /// an error.
    fn file_history(&self, path: &str, limit: usize) -> Result<Vec<CommitEntry>, GitError>;
}

/// Resolves blob OIDs to their raw content.
pub trait BlobStore {
    /// Read the contents of a blob object.
    ///
    /// Returns [`GitError::NotFound`] if no blob with that OID exists.
    fn read_blob(&self, oid: GitOid) -> Result<Vec<u8>, GitError>;
}
