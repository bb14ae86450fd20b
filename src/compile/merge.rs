//! Tree merge engine: absorb the next snapshot into the accumulated story.
//!
//! `merge(current, next)` reconciles two versions of the same logical field.
//! `current` carries the cumulative history; `next` is a bare snapshot of the
//! newest commit (every node `[Added]`). Rules, in order:
//!
//! 1. A retired (deleted) `current` that reappears in `next` keeps its
//!    history, gains `next`'s `Added` event, and adopts `next`'s content.
//! 2. Leaf → Internal records `Expanded { from: old value }`; Internal → Leaf
//!    records `Reduced { from: materialized old subtree }`. The node continues
//!    in its new variant.
//! 3. Internal ↔ Internal recurses per key. Keys missing from `next` are
//!    retired with a `Deleted` event; keys new in `next` are adopted as-is.
//! 4. Leaf ↔ Leaf with equal values is a no-op.
//! 5. Leaf ↔ Leaf with different values records `Modified { from }`, unless
//!    the new value equals the `from` of the nearest earlier `Modified` event,
//!    which is treated as a no-op. Only that single event is inspected; longer
//!    oscillations are recorded normally.
//!
//! Every event produced here is anchored to `next`'s commit, so histories stay
//! ordered as long as snapshots are merged in commit order.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::trace;

use super::snapshot::snapshot_commit;
use crate::story::{CommitId, Event, StoryNode};

/// Merge `next` into `current` in place.
pub fn merge(current: &mut StoryNode<CommitId>, next: StoryNode<CommitId>) {
    let Some(commit) = snapshot_commit(&next) else {
        return;
    };

    if !current.is_live() {
        revive(current, next);
        return;
    }

    match next {
        StoryNode::Leaf {
            value: next_value, ..
        } => match current {
            StoryNode::Leaf { value, history } => merge_leaf(value, history, next_value, commit),
            StoryNode::Internal { .. } => {
                let from = current.materialize();
                let mut history = std::mem::take(current.history_mut());
                history.push(Event::Reduced { commit, from });
                *current = StoryNode::Leaf {
                    value: next_value,
                    history,
                };
            }
        },
        StoryNode::Internal {
            tree: next_tree, ..
        } => match current {
            StoryNode::Internal { tree, .. } => merge_children(tree, next_tree, commit),
            StoryNode::Leaf { value, history } => {
                let from = std::mem::take(value);
                let mut history = std::mem::take(history);
                history.push(Event::Expanded { commit, from });
                *current = StoryNode::Internal {
                    tree: next_tree,
                    history,
                };
            }
        },
    }
}

fn merge_leaf(
    value: &mut Value,
    history: &mut Vec<Event<CommitId>>,
    next_value: Value,
    commit: CommitId,
) {
    if *value == next_value {
        return;
    }

    let reverts_last_change = history
        .iter()
        .rev()
        .find_map(|event| match event {
            Event::Modified { from, .. } => Some(from),
            _ => None,
        })
        .is_some_and(|from| *from == next_value);
    if reverts_last_change {
        trace!(%commit, "value reverts the last modification, not recorded");
        return;
    }

    let from = std::mem::replace(value, next_value);
    history.push(Event::Modified { commit, from });
}

fn merge_children(
    tree: &mut BTreeMap<String, StoryNode<CommitId>>,
    mut next_tree: BTreeMap<String, StoryNode<CommitId>>,
    commit: CommitId,
) {
    for (key, child) in tree.iter_mut() {
        match next_tree.remove(key) {
            Some(next_child) => merge(child, next_child),
            None => retire(child, commit),
        }
    }
    // Whatever is left never existed in `current`.
    tree.extend(next_tree);
}

/// Mark a node deleted at `commit`. Already-retired nodes are left alone.
fn retire(node: &mut StoryNode<CommitId>, commit: CommitId) {
    if node.is_live() {
        let from = node.materialize();
        node.history_mut().push(Event::Deleted { commit, from });
    }
}

/// Bring a retired node back with the content of `next`.
fn revive(current: &mut StoryNode<CommitId>, mut next: StoryNode<CommitId>) {
    let mut history = std::mem::take(current.history_mut());
    history.append(next.history_mut());
    *next.history_mut() = history;
    *current = next;
}
