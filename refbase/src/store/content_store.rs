use crate::errors::RefbaseResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// Opaque token identifying the exact content state of a stored item.
///
/// Assigned by the backing store on every successful write and compared only
/// for equality. A writer presents the token it observed during its pre-read;
/// the store rejects the operation with `ErrorKind::Conflict` when the token
/// no longer matches current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        VersionToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VersionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content and version token returned by a successful `read`.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    pub content: Vec<u8>,
    pub version: VersionToken,
}

/// The kind of an entry in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Result of listing a path.
///
/// A path may resolve to a single file rather than a directory; callers that
/// expect a collection must treat that case as an error, never as a
/// one-element pseudo-collection.
#[derive(Debug, Clone)]
pub enum Listing {
    File(ListEntry),
    Directory(Vec<ListEntry>),
}

/// Interface to a branch-scoped, version-controlled content host.
///
/// # Purpose
/// Defines the contract every store implementation must follow. All
/// operations are scoped to one (owner, repository) pair fixed at provider
/// construction; the `branch` argument selects the ref within it.
///
/// # Error Contract
/// - Absence is `Err` with `ErrorKind::NotFound` (read, remove, list).
/// - A stale or missing expected version token is `ErrorKind::Conflict`.
/// - Transport and backend faults are `ErrorKind::StoreError`.
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent fan-outs.
#[async_trait]
pub trait ContentStoreProvider: Send + Sync {
    /// Reads the content and current version token at `path`.
    async fn read(&self, path: &str, branch: &str) -> RefbaseResult<ContentEntry>;

    /// Writes `content` to `path`, returning the new version token.
    ///
    /// When `expected` is `Some`, the write must be rejected with
    /// `ErrorKind::Conflict` unless the token still matches current state.
    /// When `expected` is `None` the path must not already exist. `message`
    /// is a human-audit commit message; it is never machine-parsed.
    async fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        expected: Option<&VersionToken>,
    ) -> RefbaseResult<VersionToken>;

    /// Removes the content at `path`, proving current state with `expected`.
    async fn remove(
        &self,
        path: &str,
        message: &str,
        branch: &str,
        expected: &VersionToken,
    ) -> RefbaseResult<()>;

    /// Lists `path`, distinguishing a single file from a directory listing.
    async fn list(&self, path: &str, branch: &str) -> RefbaseResult<Listing>;
}

/// A content store in a Refbase database.
///
/// `ContentStore` wraps a provider implementation behind an `Arc`, so all
/// clones share the same underlying store. Handles hold it by reference
/// through the shared configuration; none of them own it.
#[derive(Clone)]
pub struct ContentStore {
    inner: Arc<dyn ContentStoreProvider>,
}

impl ContentStore {
    /// Creates a new `ContentStore` from a provider implementation.
    pub fn new<T: ContentStoreProvider + 'static>(inner: T) -> Self {
        ContentStore {
            inner: Arc::new(inner),
        }
    }
}

impl Debug for ContentStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // the provider behind the Arc is opaque
        write!(f, "ContentStore")
    }
}

impl Deref for ContentStore {
    type Target = Arc<dyn ContentStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_token_equality() {
        let a = VersionToken::new("abc123");
        let b = VersionToken::new("abc123");
        let c = VersionToken::new("def456");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "abc123");
        assert_eq!(format!("{}", c), "def456");
    }

    #[test]
    fn test_listing_entry_kinds() {
        let file = ListEntry {
            name: "alice.json".to_string(),
            kind: EntryKind::File,
        };
        let dir = ListEntry {
            name: "posts".to_string(),
            kind: EntryKind::Directory,
        };
        assert_ne!(file.kind, dir.kind);
    }
}
