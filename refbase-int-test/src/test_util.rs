use async_trait::async_trait;
use refbase::errors::{ErrorKind, RefbaseError, RefbaseResult};
use refbase::refbase::Refbase;
use refbase::store::memory::InMemoryStore;
use refbase::store::{ContentEntry, ContentStoreProvider, Listing, VersionToken};
use std::sync::atomic::{AtomicBool, Ordering};

#[ctor::ctor]
fn init_logger() {
    colog::init();
}

/// Database plus the raw store behind it, so tests can seed content the
/// engine would never write itself (corrupt JSON, stray files, nested
/// directories).
#[derive(Clone)]
pub struct TestContext {
    db: Refbase,
    store: InMemoryStore,
}

impl TestContext {
    pub fn db(&self) -> Refbase {
        self.db.clone()
    }

    pub fn store(&self) -> InMemoryStore {
        self.store.clone()
    }

    /// Seeds raw bytes at a storage path, bypassing the document engine.
    pub async fn seed_raw(&self, path: &str, content: &[u8]) -> RefbaseResult<VersionToken> {
        self.store
            .write(path, content, "seed", self.db.config().branch(), None)
            .await
    }
}

pub fn create_test_context() -> RefbaseResult<TestContext> {
    let store = InMemoryStore::new();
    let db = Refbase::builder()
        .owner("acme")
        .repo("fixtures")
        .store(store.clone())
        .connect()?;
    Ok(TestContext { db, store })
}

pub fn create_test_context_with_base_path(base_path: &str) -> RefbaseResult<TestContext> {
    let store = InMemoryStore::new();
    let db = Refbase::builder()
        .owner("acme")
        .repo("fixtures")
        .base_path(base_path)
        .store(store.clone())
        .connect()?;
    Ok(TestContext { db, store })
}

/// Builds a second database over an existing store, optionally wrapped in a
/// decorator, so tests can observe two writers racing on shared content.
pub fn connect_over<T: ContentStoreProvider + 'static>(store: T) -> RefbaseResult<Refbase> {
    Refbase::builder()
        .owner("acme")
        .repo("fixtures")
        .store(store)
        .connect()
}

/// Store decorator that fails every read of one specific path with a
/// transport fault. Used to verify that a single failed fetch fails a whole
/// collection read.
pub struct FailingReadStore {
    inner: InMemoryStore,
    fail_path: String,
}

impl FailingReadStore {
    pub fn new(inner: InMemoryStore, fail_path: &str) -> Self {
        FailingReadStore {
            inner,
            fail_path: fail_path.to_string(),
        }
    }
}

#[async_trait]
impl ContentStoreProvider for FailingReadStore {
    async fn read(&self, path: &str, branch: &str) -> RefbaseResult<ContentEntry> {
        if path == self.fail_path {
            return Err(RefbaseError::new(
                &format!("injected read failure for '{}'", path),
                ErrorKind::StoreError,
            ));
        }
        self.inner.read(path, branch).await
    }

    async fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        expected: Option<&VersionToken>,
    ) -> RefbaseResult<VersionToken> {
        self.inner.write(path, content, message, branch, expected).await
    }

    async fn remove(
        &self,
        path: &str,
        message: &str,
        branch: &str,
        expected: &VersionToken,
    ) -> RefbaseResult<()> {
        self.inner.remove(path, message, branch, expected).await
    }

    async fn list(&self, path: &str, branch: &str) -> RefbaseResult<Listing> {
        self.inner.list(path, branch).await
    }
}

/// Store decorator that sneaks a concurrent write in between a caller's
/// pre-read and its subsequent write or remove: the first read of the
/// target path is answered normally, but the underlying content is replaced
/// immediately afterwards, leaving the caller holding a stale version token.
pub struct InterposingStore {
    inner: InMemoryStore,
    target: String,
    content: Vec<u8>,
    armed: AtomicBool,
}

impl InterposingStore {
    pub fn new(inner: InMemoryStore, target: &str, content: &[u8]) -> Self {
        InterposingStore {
            inner,
            target: target.to_string(),
            content: content.to_vec(),
            armed: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl ContentStoreProvider for InterposingStore {
    async fn read(&self, path: &str, branch: &str) -> RefbaseResult<ContentEntry> {
        let entry = self.inner.read(path, branch).await?;
        if path == self.target && self.armed.swap(false, Ordering::SeqCst) {
            // concurrent writer lands between the caller's read and write
            self.inner
                .write(path, &self.content, "interposed write", branch, Some(&entry.version))
                .await?;
        }
        Ok(entry)
    }

    async fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        expected: Option<&VersionToken>,
    ) -> RefbaseResult<VersionToken> {
        self.inner.write(path, content, message, branch, expected).await
    }

    async fn remove(
        &self,
        path: &str,
        message: &str,
        branch: &str,
        expected: &VersionToken,
    ) -> RefbaseResult<()> {
        self.inner.remove(path, message, branch, expected).await
    }

    async fn list(&self, path: &str, branch: &str) -> RefbaseResult<Listing> {
        self.inner.list(path, branch).await
    }
}
