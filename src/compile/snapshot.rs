//! Snapshot building: one parsed document → a fresh, unmerged story tree.

use serde_json::Value;

use crate::story::{CommitId, Event, StoryNode};

/// Build the story tree for one document version.
///
/// Every node gets the history `[Added { commit }]`. Non-empty mappings become
/// internal nodes; non-empty sequences become internal nodes keyed by their
/// decimal index. Scalars and *empty* containers are leaves.
pub fn snapshot(value: Value, commit: CommitId) -> StoryNode<CommitId> {
    let history = vec![Event::Added { commit }];
    match value {
        Value::Object(map) if !map.is_empty() => StoryNode::Internal {
            tree: map
                .into_iter()
                .map(|(key, child)| (key, snapshot(child, commit)))
                .collect(),
            history,
        },
        Value::Array(items) if !items.is_empty() => StoryNode::Internal {
            tree: items
                .into_iter()
                .enumerate()
                .map(|(index, child)| (index.to_string(), snapshot(child, commit)))
                .collect(),
            history,
        },
        value => StoryNode::Leaf { value, history },
    }
}

/// The commit a snapshot was built for.
pub(crate) fn snapshot_commit(node: &StoryNode<CommitId>) -> Option<CommitId> {
    node.history().first().map(|event| *event.commit())
}
