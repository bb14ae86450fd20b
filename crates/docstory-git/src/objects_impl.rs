//! gix-backed object reads: blobs, path lookups inside trees, commit metadata.

use crate::error::GitError;
use crate::gix_repo::GixRepo;
use crate::types::{CommitEntry, GitOid, Signature};

/// Convert our `GitOid` to a `gix::ObjectId`.
pub(crate) fn to_gix_oid(oid: GitOid) -> gix::ObjectId {
    gix::ObjectId::from(*oid.as_bytes())
}

/// Convert a gix object id to our `GitOid`.
pub(crate) fn from_gix_oid(oid: &gix::oid) -> Result<GitOid, GitError> {
    GitOid::from_slice(oid.as_bytes()).map_err(|e| GitError::InvalidOid {
        value: oid.to_string(),
        reason: e.reason,
    })
}

pub fn read_blob(repo: &GixRepo, oid: GitOid) -> Result<Vec<u8>, GitError> {
    let mut blob = repo
        .repo
        .find_blob(to_gix_oid(oid))
        .map_err(|e| GitError::NotFound {
            message: format!("blob {oid}: {e}"),
        })?;
    Ok(blob.take_data())
}

/// Return the blob id stored at `path` inside `tree`, if any.
///
/// Directories and submodules at `path` count as absent: only file content
/// can be parsed into a story.
pub(crate) fn blob_at(tree: &gix::Tree<'_>, path: &str) -> Result<Option<gix::ObjectId>, GitError> {
    let entry = tree
        .lookup_entry_by_path(path)
        .map_err(|e| GitError::backend(&format!("lookup of '{path}'"), e))?;
    Ok(entry.and_then(|entry| {
        let mode = entry.mode();
        (!mode.is_tree() && !mode.is_commit()).then(|| entry.object_id())
    }))
}

/// Load the tree of the commit `id`.
pub(crate) fn commit_tree<'repo>(
    repo: &'repo GixRepo,
    id: gix::ObjectId,
) -> Result<(gix::Commit<'repo>, gix::Tree<'repo>), GitError> {
    let commit = repo
        .repo
        .find_commit(id)
        .map_err(|e| GitError::NotFound {
            message: format!("commit {id}: {e}"),
        })?;
    let tree = commit
        .tree()
        .map_err(|e| GitError::backend(&format!("tree of commit {id}"), e))?;
    Ok((commit, tree))
}

/// Build the [`CommitEntry`] for `commit`, recording the tracked file's path
/// and blob as of that commit.
pub(crate) fn commit_entry(
    commit: &gix::Commit<'_>,
    path: &str,
    blob: &gix::oid,
) -> Result<CommitEntry, GitError> {
    let oid = from_gix_oid(&commit.id)?;
    let time = commit
        .time()
        .map_err(|e| GitError::backend(&format!("time of commit {oid}"), e))?;
    let decoded = commit
        .decode()
        .map_err(|e| GitError::backend(&format!("failed to decode commit {oid}"), e))?;

    let author_sig = decoded.author();
    let committer_sig = decoded.committer();

    Ok(CommitEntry {
        oid,
        time: time.seconds,
        message: decoded.message.to_string(),
        author: Signature::new(author_sig.name.to_string(), author_sig.email.to_string()),
        committer: Signature::new(
            committer_sig.name.to_string(),
            committer_sig.email.to_string(),
        ),
        path: path.to_owned(),
        blob: from_gix_oid(blob)?,
    })
}
