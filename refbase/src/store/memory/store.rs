use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};
use crate::store::{
    ContentEntry, ContentStoreProvider, EntryKind, ListEntry, Listing, VersionToken,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory implementation of a Refbase content store.
///
/// # Purpose
/// `InMemoryStore` provides a complete store implementation suitable for
/// testing and temporary data. It enforces the full optimistic-concurrency
/// contract: every write produces a fresh version token, and writes or
/// removes presenting a stale token are rejected with `ErrorKind::Conflict`.
///
/// # Characteristics
/// - **Thread-Safe**: entries live behind a `parking_lot::RwLock`
/// - **Deterministic Listings**: entries are kept in a `BTreeMap`, so
///   directory listings come back in lexicographic order
/// - **No Persistence**: all data is lost when the store is dropped
///
/// All clones share the same underlying entries.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> InMemoryStore {
        InMemoryStore::default()
    }
}

#[async_trait]
impl ContentStoreProvider for InMemoryStore {
    async fn read(&self, path: &str, branch: &str) -> RefbaseResult<ContentEntry> {
        self.inner.read(path, branch)
    }

    async fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        expected: Option<&VersionToken>,
    ) -> RefbaseResult<VersionToken> {
        self.inner.write(path, content, message, branch, expected)
    }

    async fn remove(
        &self,
        path: &str,
        message: &str,
        branch: &str,
        expected: &VersionToken,
    ) -> RefbaseResult<()> {
        self.inner.remove(path, message, branch, expected)
    }

    async fn list(&self, path: &str, branch: &str) -> RefbaseResult<Listing> {
        self.inner.list(path, branch)
    }
}

#[derive(Debug, Clone)]
struct StoredEntry {
    content: Vec<u8>,
    version: VersionToken,
}

#[derive(Default)]
struct InMemoryStoreInner {
    // keyed by (branch, path) so prefix scans stay per-branch
    entries: RwLock<BTreeMap<(String, String), StoredEntry>>,
}

impl InMemoryStoreInner {
    fn next_version() -> VersionToken {
        VersionToken::new(Uuid::new_v4().to_string())
    }

    fn read(&self, path: &str, branch: &str) -> RefbaseResult<ContentEntry> {
        let entries = self.entries.read();
        match entries.get(&(branch.to_string(), path.to_string())) {
            Some(entry) => Ok(ContentEntry {
                content: entry.content.clone(),
                version: entry.version.clone(),
            }),
            None => Err(RefbaseError::new(
                &format!("no content at '{}' on branch '{}'", path, branch),
                ErrorKind::NotFound,
            )),
        }
    }

    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        expected: Option<&VersionToken>,
    ) -> RefbaseResult<VersionToken> {
        let mut entries = self.entries.write();
        let key = (branch.to_string(), path.to_string());
        match (entries.get(&key), expected) {
            (Some(current), Some(expected)) if &current.version == expected => {}
            (None, None) => {}
            (Some(_), _) => {
                return Err(RefbaseError::new(
                    &format!("version token is stale or missing for '{}'", path),
                    ErrorKind::Conflict,
                ));
            }
            (None, Some(_)) => {
                return Err(RefbaseError::new(
                    &format!("no content at '{}' to match expected version", path),
                    ErrorKind::Conflict,
                ));
            }
        }
        let version = Self::next_version();
        log::trace!("write '{}' on '{}': {}", path, branch, message);
        entries.insert(
            key,
            StoredEntry {
                content: content.to_vec(),
                version: version.clone(),
            },
        );
        Ok(version)
    }

    fn remove(
        &self,
        path: &str,
        message: &str,
        branch: &str,
        expected: &VersionToken,
    ) -> RefbaseResult<()> {
        let mut entries = self.entries.write();
        let key = (branch.to_string(), path.to_string());
        match entries.get(&key) {
            None => Err(RefbaseError::new(
                &format!("no content at '{}' on branch '{}'", path, branch),
                ErrorKind::NotFound,
            )),
            Some(current) if &current.version != expected => Err(RefbaseError::new(
                &format!("version token is stale for '{}'", path),
                ErrorKind::Conflict,
            )),
            Some(_) => {
                log::trace!("remove '{}' on '{}': {}", path, branch, message);
                entries.remove(&key);
                Ok(())
            }
        }
    }

    fn list(&self, path: &str, branch: &str) -> RefbaseResult<Listing> {
        let entries = self.entries.read();
        if entries.contains_key(&(branch.to_string(), path.to_string())) {
            let name = path.rsplit('/').next().unwrap_or(path).to_string();
            return Ok(Listing::File(ListEntry {
                name,
                kind: EntryKind::File,
            }));
        }
        let prefix = format!("{}/", path);
        let mut children: Vec<ListEntry> = Vec::new();
        for (entry_branch, entry_path) in entries.keys() {
            if entry_branch.as_str() != branch {
                continue;
            }
            let Some(rest) = entry_path.strip_prefix(&prefix) else {
                continue;
            };
            let (name, kind) = match rest.split_once('/') {
                Some((dir, _)) => (dir.to_string(), EntryKind::Directory),
                None => (rest.to_string(), EntryKind::File),
            };
            // entries under the same subdirectory are adjacent in the BTreeMap;
            // a file and a subdirectory may share a name, so kind matters
            let duplicate = children
                .last()
                .is_some_and(|c| c.name == name && c.kind == kind);
            if !duplicate {
                children.push(ListEntry { name, kind });
            }
        }
        if children.is_empty() {
            return Err(RefbaseError::new(
                &format!("no listing at '{}' on branch '{}'", path, branch),
                ErrorKind::NotFound,
            ));
        }
        Ok(Listing::Directory(children))
    }
}
