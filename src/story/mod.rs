//! The story data model: annotated tree, events, and interned side tables.

mod event;
mod node;
mod types;

pub use event::Event;
pub use node::StoryNode;
pub use types::{CommitId, CommitRecord, Identity, PARSE_ERROR_CODE, ParseFailure, Story};
