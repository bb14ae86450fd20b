//! The gix-backed implementation of [`HistoryProvider`] and [`BlobStore`].

use std::path::{Path, PathBuf};

use crate::error::GitError;
use crate::repo::{BlobStore, HistoryProvider};
use crate::types::{CommitEntry, GitOid};

/// A repository handle backed by [gix](https://github.com/GitoxideLabs/gitoxide).
///
/// Construct via [`GixRepo::open`] or [`GixRepo::open_at`].
pub struct GixRepo {
    pub(crate) repo: gix::Repository,
    pub(crate) workdir: Option<PathBuf>,
}

impl GixRepo {
    /// Open the git repository at or above `path`.
    ///
    /// # Errors
    /// Returns [`GitError::BackendError`] if no repository is found.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = gix::discover(path).map_err(|e| GitError::backend("open repository", e))?;
        let workdir = repo.workdir().map(Path::to_path_buf);
        Ok(Self { repo, workdir })
    }

    /// Open a git repository at exactly `path` (no parent discovery).
    ///
    /// # Errors
    /// Returns [`GitError::BackendError`] if `path` is not a repository.
    pub fn open_at(path: &Path) -> Result<Self, GitError> {
        let repo = gix::open_opts(path, gix::open::Options::isolated())
            .map_err(|e| GitError::backend("open repository", e))?;
        let workdir = repo.workdir().map(Path::to_path_buf);
        Ok(Self { repo, workdir })
    }

    /// The working directory, if this is not a bare repository.
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

impl HistoryProvider for GixRepo {
    fn file_history(&self, path: &str, limit: usize) -> Result<Vec<CommitEntry>, GitError> {
        crate::history_impl::file_history(self, path, limit)
    }
}

impl BlobStore for GixRepo {
    fn read_blob(&self, oid: GitOid) -> Result<Vec<u8>, GitError> {
        crate::objects_impl::read_blob(self, oid)
    }
}
