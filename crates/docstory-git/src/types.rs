//! Value types shared between the git layer and the story compiler.
//!
//! These types contain no gix types; the backend is an implementation
//! detail of [`GixRepo`](crate::GixRepo).

use std::fmt;

// ---------------------------------------------------------------------------
// GitOid
// ---------------------------------------------------------------------------

/// A git object identifier (SHA-1, 20 bytes).
///
/// Displays as 40 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GitOid([u8; 20]);

impl GitOid {
    /// Create a `GitOid` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create a `GitOid` from a byte slice, which must be exactly 20 bytes.
    ///
    /// # Errors
    /// Returns an error if the slice has any other length (e.g. a SHA-256 id).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, OidParseError> {
        let array: [u8; 20] = bytes.try_into().map_err(|_| OidParseError {
            value: format!("{} raw bytes", bytes.len()),
            reason: "expected a 20-byte SHA-1 object id".to_owned(),
        })?;
        Ok(Self(array))
    }

    /// Return the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for GitOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for GitOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GitOid({self})")
    }
}

/// Error from building a [`GitOid`] out of raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OidParseError {
    /// The raw value that failed.
    pub value: String,
    /// Why it failed.
    pub reason: String,
}

impl fmt::Display for OidParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid OID {:?}: {}", self.value, self.reason)
    }
}

impl std::error::Error for OidParseError {}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// The identity recorded on a commit as author or committer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Display name (e.g. `"Alice"`).
    pub name: String,
    /// Email address; the story compiler deduplicates identities on it.
    pub email: String,
}

impl Signature {
    /// Create a signature from a name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

// ---------------------------------------------------------------------------
// CommitEntry
// ---------------------------------------------------------------------------

/// One commit in the history of a tracked file.
///
/// Produced by [`HistoryProvider::file_history`](crate::HistoryProvider::file_history).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitEntry {
    /// The commit OID.
    pub oid: GitOid,
    /// Commit time in seconds since the Unix epoch.
    pub time: i64,
    /// The full commit message.
    pub message: String,
    /// Author identity.
    pub author: Signature,
    /// Committer identity.
    pub committer: Signature,
    /// Path of the tracked file as of this commit.
    pub path: String,
    /// OID of the file's blob in this commit.
    pub blob: GitOid,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_displays_lowercase_hex() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xAB;
        bytes[19] = 0x0f;
        let oid = GitOid::from_bytes(bytes);
        let hex = oid.to_string();
        assert_eq!(hex.len(), 40);
        assert!(hex.starts_with("ab00"));
        assert!(hex.ends_with("000f"));
        assert_eq!(format!("{oid:?}"), format!("GitOid({hex})"));
    }

    #[test]
    fn oid_from_slice_checks_length() {
        let oid = GitOid::from_slice(&[0xab; 20]).unwrap();
        assert_eq!(oid.as_bytes(), &[0xab; 20]);
        assert!(GitOid::from_slice(&[0u8; 32]).is_err());
    }

    #[test]
    fn signature_display() {
        let sig = Signature::new("Alice", "alice@example.com");
        assert_eq!(sig.to_string(), "Alice <alice@example.com>");
    }
}
