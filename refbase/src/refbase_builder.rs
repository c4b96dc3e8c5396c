use crate::common::constants::{DEFAULT_BASE_PATH, DEFAULT_BRANCH};
use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};
use crate::refbase::Refbase;
use crate::refbase_config::RefbaseConfig;
use crate::store::{ContentStore, ContentStoreProvider};

/// Builder for creating and configuring a Refbase database instance.
///
/// `RefbaseBuilder` provides a fluent API for configuring the database
/// before connecting. Configuration errors are captured as they happen and
/// propagated when `connect()` is called, so chained calls never panic.
///
/// # Examples
///
/// ```rust,ignore
/// use refbase::refbase::Refbase;
/// use refbase::store::memory::InMemoryStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Refbase::builder()
///     .owner("acme")
///     .repo("content")
///     .branch("main")
///     .base_path("data")
///     .store(InMemoryStore::new())
///     .connect()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct RefbaseBuilder {
    error: Option<RefbaseError>,
    owner: Option<String>,
    repo: Option<String>,
    branch: Option<String>,
    base_path: Option<String>,
    store: Option<ContentStore>,
}

impl RefbaseBuilder {
    /// Creates a new `RefbaseBuilder` with default configuration.
    ///
    /// The defaults are branch `"main"` and an empty base path (documents
    /// live at the store root). Owner, repository, and a store provider
    /// must be supplied before `connect()`.
    pub fn new() -> Self {
        RefbaseBuilder::default()
    }

    /// Sets the owner of the backing repository.
    pub fn owner(mut self, owner: &str) -> Self {
        if self.error.is_none() {
            if owner.is_empty() {
                self.error = Some(RefbaseError::new(
                    "owner must not be empty",
                    ErrorKind::InvalidConfig,
                ));
            } else {
                self.owner = Some(owner.to_string());
            }
        }
        self
    }

    /// Sets the backing repository name.
    pub fn repo(mut self, repo: &str) -> Self {
        if self.error.is_none() {
            if repo.is_empty() {
                self.error = Some(RefbaseError::new(
                    "repo must not be empty",
                    ErrorKind::InvalidConfig,
                ));
            } else {
                self.repo = Some(repo.to_string());
            }
        }
        self
    }

    /// Sets the branch all store operations are scoped to.
    ///
    /// Defaults to `"main"` when not called.
    pub fn branch(mut self, branch: &str) -> Self {
        if self.error.is_none() {
            if branch.is_empty() {
                self.error = Some(RefbaseError::new(
                    "branch must not be empty",
                    ErrorKind::InvalidConfig,
                ));
            } else {
                self.branch = Some(branch.to_string());
            }
        }
        self
    }

    /// Sets the path prefix under which all documents are stored.
    ///
    /// An empty base path (the default) places collections at the store
    /// root.
    pub fn base_path(mut self, base_path: &str) -> Self {
        if self.error.is_none() {
            self.base_path = Some(base_path.to_string());
        }
        self
    }

    /// Supplies the content store provider.
    ///
    /// The provider owns the transport to the backing host; this crate only
    /// drives it through the `ContentStoreProvider` contract.
    pub fn store<T: ContentStoreProvider + 'static>(mut self, store: T) -> Self {
        if self.error.is_none() {
            self.store = Some(ContentStore::new(store));
        }
        self
    }

    /// Finishes configuration and creates the database instance.
    ///
    /// # Errors
    ///
    /// The first captured configuration error, or `ErrorKind::InvalidConfig`
    /// / `ErrorKind::StoreNotConfigured` when a required value is missing.
    pub fn connect(self) -> RefbaseResult<Refbase> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let owner = self
            .owner
            .ok_or_else(|| RefbaseError::new("owner is required", ErrorKind::InvalidConfig))?;
        let repo = self
            .repo
            .ok_or_else(|| RefbaseError::new("repo is required", ErrorKind::InvalidConfig))?;
        if self.store.is_none() {
            return Err(RefbaseError::new(
                "a content store provider is required",
                ErrorKind::StoreNotConfigured,
            ));
        }

        let config = RefbaseConfig::new(
            owner,
            repo,
            self.branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            self.base_path
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            self.store,
        );
        log::debug!(
            "connecting to '{}/{}' on branch '{}'",
            config.owner(),
            config.repo(),
            config.branch()
        );
        Ok(Refbase::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_connect_with_defaults() {
        let db = Refbase::builder()
            .owner("acme")
            .repo("content")
            .store(InMemoryStore::new())
            .connect()
            .unwrap();
        assert_eq!(db.config().branch(), "main");
        assert_eq!(db.config().base_path(), "");
    }

    #[test]
    fn test_missing_owner_is_rejected() {
        let result = Refbase::builder()
            .repo("content")
            .store(InMemoryStore::new())
            .connect();
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_missing_store_is_rejected() {
        let result = Refbase::builder().owner("acme").repo("content").connect();
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::StoreNotConfigured);
    }

    #[test]
    fn test_captured_error_surfaces_at_connect() {
        let result = Refbase::builder()
            .owner("")
            .repo("content")
            .store(InMemoryStore::new())
            .connect();
        let err = result.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidConfig);
        assert_eq!(err.message(), "owner must not be empty");
    }

    #[test]
    fn test_custom_branch_and_base_path() {
        let db = Refbase::builder()
            .owner("acme")
            .repo("content")
            .branch("staging")
            .base_path("data")
            .store(InMemoryStore::new())
            .connect()
            .unwrap();
        assert_eq!(db.config().branch(), "staging");
        assert_eq!(db.config().base_path(), "data");
    }
}
