//! Configuration shared by every handle of a Refbase database.

use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};
use crate::store::ContentStore;
use std::sync::Arc;

/// Immutable configuration for a Refbase database.
///
/// Holds the (owner, repository, branch) triple the backing store is scoped
/// to, the optional base path prefixed to every storage path, and the
/// content store itself. Cloning is cheap; all clones share one inner
/// configuration, so collection and document handles reach the store by
/// reference rather than owning it.
#[derive(Clone)]
pub struct RefbaseConfig {
    inner: Arc<RefbaseConfigInner>,
}

struct RefbaseConfigInner {
    owner: String,
    repo: String,
    branch: String,
    base_path: String,
    store: Option<ContentStore>,
}

impl RefbaseConfig {
    pub(crate) fn new(
        owner: String,
        repo: String,
        branch: String,
        base_path: String,
        store: Option<ContentStore>,
    ) -> Self {
        RefbaseConfig {
            inner: Arc::new(RefbaseConfigInner {
                owner,
                repo,
                branch,
                base_path,
                store,
            }),
        }
    }

    /// The owner of the backing repository.
    pub fn owner(&self) -> &str {
        &self.inner.owner
    }

    /// The backing repository name.
    pub fn repo(&self) -> &str {
        &self.inner.repo
    }

    /// The branch every store operation is scoped to.
    pub fn branch(&self) -> &str {
        &self.inner.branch
    }

    /// The path prefix for all storage paths; empty means the store root.
    pub fn base_path(&self) -> &str {
        &self.inner.base_path
    }

    /// Gets the configured content store.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::StoreNotConfigured` if no store was supplied.
    pub fn content_store(&self) -> RefbaseResult<ContentStore> {
        self.inner.store.clone().ok_or_else(|| {
            RefbaseError::new(
                "no content store provider configured",
                ErrorKind::StoreNotConfigured,
            )
        })
    }

    #[cfg(test)]
    pub(crate) fn for_testing() -> Self {
        use crate::common::constants::DEFAULT_BRANCH;
        use crate::store::memory::InMemoryStore;

        RefbaseConfig::new(
            "test-owner".to_string(),
            "test-repo".to_string(),
            DEFAULT_BRANCH.to_string(),
            String::new(),
            Some(ContentStore::new(InMemoryStore::new())),
        )
    }
}
