//! Core database interface.

use crate::collection::{Collection, DocumentRef};
use crate::common::paths::split_document_path;
use crate::errors::RefbaseResult;
use crate::refbase_builder::RefbaseBuilder;
use crate::refbase_config::RefbaseConfig;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A Refbase database: a document store over a version-controlled content
/// host.
///
/// `Refbase` is the entry point of the API. It turns path strings into
/// collection and document handles; the handles do the actual work against
/// the backing store. All clones share the same underlying configuration
/// through `Arc`.
///
/// # Examples
///
/// ```rust,ignore
/// use refbase::refbase::Refbase;
/// use refbase::store::memory::InMemoryStore;
/// use serde_json::json;
///
/// # async fn example() -> refbase::errors::RefbaseResult<()> {
/// let db = Refbase::builder()
///     .owner("acme")
///     .repo("content")
///     .store(InMemoryStore::new())
///     .connect()?;
///
/// let users = db.collection("users")?;
/// users.doc("alice")?.set(json!({"name": "Alice"})).await?;
///
/// let alice = db.doc("users/alice")?.get().await?;
/// assert!(alice.exists);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Refbase {
    inner: Arc<RefbaseInner>,
}

struct RefbaseInner {
    config: RefbaseConfig,
}

impl Refbase {
    /// Returns a builder for configuring a new database instance.
    pub fn builder() -> RefbaseBuilder {
        RefbaseBuilder::new()
    }

    pub(crate) fn new(config: RefbaseConfig) -> Self {
        Refbase {
            inner: Arc::new(RefbaseInner { config }),
        }
    }

    /// The shared configuration of this database.
    pub fn config(&self) -> RefbaseConfig {
        self.inner.config.clone()
    }

    /// Returns a handle to the collection at the given path.
    ///
    /// Any non-empty slash-delimited path without empty segments is valid,
    /// including sub-collection paths nested under a document.
    pub fn collection(&self, path: &str) -> RefbaseResult<Collection> {
        Collection::new(self.inner.config.clone(), path)
    }

    /// Returns a handle to the document at the given path.
    ///
    /// The path must have an even segment count of at least 2; the last
    /// segment is the document id.
    pub fn doc(&self, path: &str) -> RefbaseResult<DocumentRef> {
        let (collection_path, id) = split_document_path(path)?;
        DocumentRef::new(self.inner.config.clone(), &collection_path, &id)
    }
}

impl Debug for Refbase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refbase")
            .field("owner", &self.inner.config.owner())
            .field("repo", &self.inner.config.repo())
            .field("branch", &self.inner.config.branch())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::store::memory::InMemoryStore;

    fn test_db() -> Refbase {
        Refbase::builder()
            .owner("acme")
            .repo("content")
            .store(InMemoryStore::new())
            .connect()
            .unwrap()
    }

    #[test]
    fn test_doc_resolves_collection_and_id() {
        let db = test_db();
        let doc = db.doc("users/alice").unwrap();
        assert_eq!(doc.collection_path(), "users");
        assert_eq!(doc.id(), "alice");

        let doc = db.doc("users/alice/posts/p1").unwrap();
        assert_eq!(doc.collection_path(), "users/alice/posts");
        assert_eq!(doc.id(), "p1");
    }

    #[test]
    fn test_doc_rejects_invalid_paths() {
        let db = test_db();
        for path in ["users", "users/alice/posts", "", "users//alice/x"] {
            let err = db.doc(path).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPath, "path '{}'", path);
        }
    }

    #[test]
    fn test_collection_accepts_nested_paths() {
        let db = test_db();
        assert!(db.collection("users").is_ok());
        assert!(db.collection("users/alice/posts").is_ok());
        assert!(db.collection("").is_err());
    }

    #[test]
    fn test_clones_share_configuration() {
        let db = test_db();
        let clone = db.clone();
        assert_eq!(db.config().owner(), clone.config().owner());
    }

    #[test]
    fn test_debug_shows_store_scope() {
        let db = test_db();
        let formatted = format!("{:?}", db);
        assert!(formatted.contains("acme"));
        assert!(formatted.contains("content"));
        assert!(formatted.contains("main"));
    }
}
