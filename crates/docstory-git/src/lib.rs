//! Git history layer for docstory.
//!
//! This crate defines the two traits through which the story compiler reads a
//! repository: [`HistoryProvider`] enumerates the commits that touched a file
//! (following renames), and [`BlobStore`] resolves a blob OID to its bytes.
//! No other docstory crate imports gix directly; they program against these
//! traits.
//!
//! # Crate layout
//!
//! - [`repo`]: the [`HistoryProvider`] and [`BlobStore`] trait definitions.
//! - [`types`]: value types used in trait signatures ([`GitOid`],
//!   [`Signature`], [`CommitEntry`]).
//! - [`error`]: the [`GitError`] enum returned by all trait methods.

pub mod error;
pub mod repo;
pub mod types;

// gix-backed implementation modules
mod gix_repo;
mod history_impl;
mod objects_impl;

pub use gix_repo::GixRepo;

pub use error::GitError;
pub use repo::{BlobStore, DEFAULT_HISTORY_LIMIT, HistoryProvider};
pub use types::{CommitEntry, GitOid, OidParseError, Signature};
