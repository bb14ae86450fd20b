//! docstory: per-field edit history for JSON/YAML documents tracked in git.
//!
//! Given a document path, [`compile`] walks the commits that touched it
//! (following renames), parses every version, and folds the versions into a
//! single [`Story`]: a tree mirroring the document in which every field and
//! every container carries a timeline of typed [`Event`]s, each anchored
//! to the commit that caused it.
//!
//! ```no_run
//! use docstory::{CompileOptions, compile};
//! use docstory_git::GixRepo;
//!
//! let repo = GixRepo::open(std::path::Path::new("."))?;
//! let story = compile(&repo, "config/app.yml", &CompileOptions::default())?;
//! for failure in &story.errors {
//!     eprintln!("{}: {}", failure.code, failure.message);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod parser;
pub mod story;

pub use compile::{CompileOptions, compile, fold};
pub use config::{ConfigError, StoryConfig};
pub use error::StoryError;
pub use parser::{BoxError, DefaultParser, DocumentParser, ParseError};
pub use story::{
    CommitId, CommitRecord, Event, Identity, PARSE_ERROR_CODE, ParseFailure, Story, StoryNode,
};
