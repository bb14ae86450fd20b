//! gix-backed, rename-aware file history walk.
//!
//! Walks the ancestors of HEAD newest-first (by commit time) and reports every
//! commit whose blob at the tracked path differs from its first parent's.
//! When the tracked path first appears in a commit whose parent held the very
//! same blob under another name (which the commit no longer has), the walk
//! continues under that old name.

use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;
use tracing::{debug, instrument};

use crate::error::GitError;
use crate::gix_repo::GixRepo;
use crate::objects_impl::{blob_at, commit_entry, commit_tree};
use crate::types::CommitEntry;

#[instrument(skip(repo))]
pub fn file_history(
    repo: &GixRepo,
    path: &str,
    limit: usize,
) -> Result<Vec<CommitEntry>, GitError> {
    let mut entries = Vec::new();
    if limit == 0 {
        return Ok(entries);
    }

    let head = repo
        .repo
        .head()
        .map_err(|e| GitError::backend("read HEAD", e))?;
    let Some(head_id) = head.id() else {
        debug!("HEAD is unborn, no history");
        return Ok(entries);
    };

    let walk = head_id
        .ancestors()
        .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
        .all()
        .map_err(|e| GitError::backend("start revision walk", e))?;

    let mut tracked = path.trim_start_matches("./").to_owned();
    for info in walk {
        let info = info.map_err(|e| GitError::backend("revision walk", e))?;
        let (commit, tree) = commit_tree(repo, info.id)?;
        let Some(blob) = blob_at(&tree, &tracked)? else {
            continue;
        };

        let parent_tree = match commit.parent_ids().next() {
            Some(parent) => Some(commit_tree(repo, parent.detach())?.1),
            None => None,
        };
        let parent_blob = match &parent_tree {
            Some(parent_tree) => blob_at(parent_tree, &tracked)?,
            None => None,
        };
        if parent_blob == Some(blob) {
            continue;
        }

        entries.push(commit_entry(&commit, &tracked, &blob)?);

        if parent_blob.is_none()
            && let Some(parent_tree) = &parent_tree
            && let Some(old_path) = rename_source(&tree, parent_tree, blob, &tracked)?
        {
            debug!(from = %old_path, to = %tracked, commit = %info.id, "following rename");
            tracked = old_path;
        }

        if entries.len() >= limit {
            debug!(limit, "history limit reached");
            break;
        }
    }

    Ok(entries)
}

/// Find the path under which `blob` lived in `parent_tree` before `tree`
/// introduced it at `tracked`.
///
/// Only exact renames are detected: the old path must carry the identical
/// blob in the parent and must no longer carry it in the commit.
fn rename_source(
    tree: &gix::Tree<'_>,
    parent_tree: &gix::Tree<'_>,
    blob: gix::ObjectId,
    tracked: &str,
) -> Result<Option<String>, GitError> {
    let mut recorder = gix::traverse::tree::Recorder::default();
    parent_tree
        .traverse()
        .breadthfirst(&mut recorder)
        .map_err(|e| GitError::backend("traverse parent tree", e))?;

    for record in recorder.records {
        if record.oid != blob || record.mode.is_tree() {
            continue;
        }
        let candidate = record.filepath.to_string();
        if candidate == tracked {
            continue;
        }
        if blob_at(tree, &candidate)? != Some(blob) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}
