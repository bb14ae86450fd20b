//! Error types for git operations.
//!
//! [`GitError`] is the single error type returned by the
//! [`HistoryProvider`](crate::HistoryProvider) and
//! [`BlobStore`](crate::BlobStore) traits. Callers match on the variant
//! instead of parsing messages.

use thiserror::Error;

/// Errors returned by history and blob operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// A requested object or path was not found.
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable description of what was missing.
        message: String,
    },

    /// An object id had an unexpected length.
    #[error("invalid OID `{value}`: {reason}")]
    InvalidOid {
        /// The raw value that failed validation.
        value: String,
        /// Why validation failed.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The underlying git backend returned an unclassified error.
    ///
    /// The `message` should include enough context to diagnose the failure.
    #[error("git backend error: {message}")]
    BackendError {
        /// Freeform error description from the backend.
        message: String,
    },
}

impl GitError {
    pub(crate) fn backend(context: &str, err: impl std::fmt::Display) -> Self {
        Self::BackendError {
            message: format!("{context}: {err}"),
        }
    }
}
