//! One position in a story tree: a leaf value or a mapping of named children.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::event::Event;

/// A node of the story tree.
///
/// Serializes as `{"value": ..., "history": [...]}` for leaves and
/// `{"tree": {...}, "history": [...]}` for internal nodes. `history` is
/// ordered oldest to newest and is never empty.
///
/// A node whose latest event is [`Event::Deleted`] is *retired*: it stays in
/// the tree so its history survives, but live lookups skip it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StoryNode<C = usize> {
    /// A scalar (or empty container) value.
    Leaf {
        /// The current value.
        value: Value,
        /// Events for this field, oldest first.
        history: Vec<Event<C>>,
    },
    /// A non-empty mapping.
    Internal {
        /// Children by key. Key order carries no meaning.
        tree: BTreeMap<String, StoryNode<C>>,
        /// Events for this node, oldest first.
        history: Vec<Event<C>>,
    },
}

impl<C> StoryNode<C> {
    pub const fn history(&self) -> &Vec<Event<C>> {
        match self {
            Self::Leaf { history, .. } | Self::Internal { history, .. } => history,
        }
    }

    pub const fn history_mut(&mut self) -> &mut Vec<Event<C>> {
        match self {
            Self::Leaf { history, .. } | Self::Internal { history, .. } => history,
        }
    }

    /// `false` once the field has been deleted and not re-added since.
    pub fn is_live(&self) -> bool {
        self.history().last().is_none_or(|event| !event.is_deletion())
    }

    /// Children of an internal node, including retired ones.
    pub const fn children(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Internal { tree, .. } => Some(tree),
            Self::Leaf { .. } => None,
        }
    }

    /// Look up a live descendant by key path. An empty path returns `self`.
    ///
    /// Retired nodes (and anything below them) are not found.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Self> {
        if !self.is_live() {
            return None;
        }
        match path.split_first() {
            None => Some(self),
            Some((key, rest)) => self.children()?.get(key.as_ref())?.get(rest),
        }
    }

    /// Collapse this subtree to the plain document value it represents.
    ///
    /// Retired children are left out.
    pub fn materialize(&self) -> Value {
        match self {
            Self::Leaf { value, .. } => value.clone(),
            Self::Internal { tree, .. } => Value::Object(
                tree.iter()
                    .filter(|(_, child)| child.is_live())
                    .map(|(key, child)| (key.clone(), child.materialize()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Visit every event in the subtree: a node's own history first, then its
    /// children in key order.
    pub fn for_each_event(&self, f: &mut impl FnMut(&Event<C>)) {
        self.history().iter().for_each(&mut *f);
        if let Self::Internal { tree, .. } = self {
            for child in tree.values() {
                child.for_each_event(f);
            }
        }
    }

    /// Rewrite every commit reference in the subtree.
    pub fn map_commits<D>(self, f: &mut impl FnMut(C) -> D) -> StoryNode<D> {
        match self {
            Self::Leaf { value, history } => StoryNode::Leaf {
                value,
                history: history.into_iter().map(|e| e.map_commit(f)).collect(),
            },
            Self::Internal { tree, history } => StoryNode::Internal {
                history: history.into_iter().map(|e| e.map_commit(f)).collect(),
                tree: tree
                    .into_iter()
                    .map(|(key, child)| (key, child.map_commits(f)))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(value: Value, history: Vec<Event>) -> StoryNode {
        StoryNode::Leaf { value, history }
    }

    fn sample() -> StoryNode {
        let mut tree = BTreeMap::new();
        tree.insert("a".to_owned(), leaf(json!(1), vec![Event::Added { commit: 1 }]));
        tree.insert(
            "gone".to_owned(),
            leaf(
                json!(2),
                vec![
                    Event::Added { commit: 1 },
                    Event::Deleted {
                        commit: 0,
                        from: json!(2),
                    },
                ],
            ),
        );
        StoryNode::Internal {
            tree,
            history: vec![Event::Added { commit: 1 }],
        }
    }

    #[test]
    fn materialize_skips_retired_children() {
        assert_eq!(sample().materialize(), json!({"a": 1}));
    }

    #[test]
    fn get_finds_live_nodes_only() {
        let node = sample();
        assert!(node.get::<&str>(&[]).is_some());
        assert!(node.get(&["a"]).is_some());
        assert!(node.get(&["gone"]).is_none());
        assert!(node.get(&["a", "deeper"]).is_none());
        assert!(node.children().unwrap().contains_key("gone"));
    }

    #[test]
    fn events_visit_parent_before_children() {
        let mut seen = Vec::new();
        sample().for_each_event(&mut |e| seen.push(*e.commit()));
        assert_eq!(seen, vec![1, 1, 1, 0]);
    }

    #[test]
    fn serializes_as_plain_nested_data() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["tree"]["a"]["value"], json!(1));
        assert_eq!(value["history"][0]["type"], json!("added"));
        assert!(value.get("value").is_none());
    }
}
