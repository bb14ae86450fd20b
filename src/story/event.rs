//! Typed, commit-anchored events recorded in a node's history.

use serde::Serialize;
use serde_json::Value;

/// A change recorded against one node of a story tree.
///
/// `C` is the commit reference: a [`CommitId`](super::CommitId) while the
/// story is being compiled, and a dense index into
/// [`Story::commits`](super::Story::commits) once commits are interned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event<C = usize> {
    /// The field came into existence (or came back after a deletion).
    Added {
        /// Commit that added the field.
        commit: C,
    },
    /// A scalar value changed.
    Modified {
        /// Commit that changed the value.
        commit: C,
        /// The value before the change.
        from: Value,
    },
    /// The field disappeared from the document.
    Deleted {
        /// Commit that removed the field.
        commit: C,
        /// The last value (or materialized subtree) before removal.
        from: Value,
    },
    /// A scalar turned into a non-empty mapping.
    Expanded {
        /// Commit that made the change.
        commit: C,
        /// The scalar before the change.
        from: Value,
    },
    /// A non-empty mapping collapsed into a scalar.
    Reduced {
        /// Commit that made the change.
        commit: C,
        /// The materialized subtree before the change.
        from: Value,
    },
    /// The document itself was moved to a new path.
    ///
    /// Recorded on the root node only. A move made before any version of the
    /// document parsed has no root to attach to and is not recorded.
    Moved {
        /// Commit that performed the move.
        commit: C,
        /// Path of the document before the move.
        #[serde(rename = "oldPath")]
        old_path: String,
    },
}

impl<C> Event<C> {
    /// The commit this event is anchored to.
    pub const fn commit(&self) -> &C {
        match self {
            Self::Added { commit }
            | Self::Modified { commit, .. }
            | Self::Deleted { commit, .. }
            | Self::Expanded { commit, .. }
            | Self::Reduced { commit, .. }
            | Self::Moved { commit, .. } => commit,
        }
    }

    /// Rewrite the commit reference, keeping everything else.
    pub fn map_commit<D>(self, f: &mut impl FnMut(C) -> D) -> Event<D> {
        match self {
            Self::Added { commit } => Event::Added { commit: f(commit) },
            Self::Modified { commit, from } => Event::Modified {
                commit: f(commit),
                from,
            },
            Self::Deleted { commit, from } => Event::Deleted {
                commit: f(commit),
                from,
            },
            Self::Expanded { commit, from } => Event::Expanded {
                commit: f(commit),
                from,
            },
            Self::Reduced { commit, from } => Event::Reduced {
                commit: f(commit),
                from,
            },
            Self::Moved { commit, old_path } => Event::Moved {
                commit: f(commit),
                old_path,
            },
        }
    }

    /// `true` for [`Event::Deleted`].
    pub const fn is_deletion(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }
}
