use crate::collection::{CollectionSnapshot, DocumentRef};
use crate::common::constants::DOCUMENT_SUFFIX;
use crate::common::paths::{collection_storage_path, validate_collection_path};
use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};
use crate::refbase_config::RefbaseConfig;
use crate::store::{EntryKind, Listing};
use futures::future::try_join_all;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use uuid::Uuid;

/// A handle to a collection of documents in a Refbase database.
///
/// Like `DocumentRef`, the handle is a cheap value object with no lifecycle
/// of its own. The collection comes into being when its first document is
/// written; an absent collection simply lists as empty.
///
/// # Examples
///
/// ```rust,ignore
/// use serde_json::json;
///
/// # async fn example(db: refbase::refbase::Refbase) -> refbase::errors::RefbaseResult<()> {
/// let users = db.collection("users")?;
/// let doc = users.add(json!({"name": "Alice"})).await?;
///
/// let snapshot = users.get().await?;
/// assert!(!snapshot.empty);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Collection {
    config: RefbaseConfig,
    path: String,
    storage_path: String,
}

impl Collection {
    pub(crate) fn new(config: RefbaseConfig, path: &str) -> RefbaseResult<Self> {
        validate_collection_path(path)?;
        let storage_path = collection_storage_path(config.base_path(), path);
        Ok(Collection {
            config,
            path: path.to_string(),
            storage_path,
        })
    }

    /// The collection path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a handle to the document with the given id in this collection.
    pub fn doc(&self, id: &str) -> RefbaseResult<DocumentRef> {
        DocumentRef::new(self.config.clone(), &self.path, id)
    }

    /// Creates a new document with a random unique id and the given data.
    ///
    /// The id is a UUIDv4, so it never collides with an existing document;
    /// the write therefore uses plain overwrite semantics, no merge.
    pub async fn add(&self, data: Value) -> RefbaseResult<DocumentRef> {
        let id = Uuid::new_v4().to_string();
        let doc = self.doc(&id)?;
        doc.set(data).await?;
        Ok(doc)
    }

    /// Reads all documents in this collection.
    ///
    /// The storage path is listed, entries are filtered down to document
    /// files with the `.json` suffix (other files and subdirectories are
    /// excluded), and every surviving document is fetched concurrently. This is a
    /// join-all: the call completes when every fetch has resolved, and the
    /// first hard failure fails the whole call without cancelling inflight
    /// siblings. There is no best-effort partial result.
    ///
    /// An absent collection returns `{docs: [], empty: true}`.
    ///
    /// # Errors
    ///
    /// `ErrorKind::NotACollection` when the path resolves to a single file;
    /// `ErrorKind::DocumentRead` for listing or per-document fetch failures.
    pub async fn get(&self) -> RefbaseResult<CollectionSnapshot> {
        let store = self.config.content_store()?;
        log::debug!("listing collection '{}'", self.path);
        let listing = match store.list(&self.storage_path, self.config.branch()).await {
            Ok(listing) => listing,
            Err(e) if e.kind() == &ErrorKind::NotFound => {
                return Ok(CollectionSnapshot::new(Vec::new()));
            }
            Err(e) => {
                return Err(RefbaseError::new_with_cause(
                    &format!("failed to list collection '{}'", self.path),
                    ErrorKind::DocumentRead,
                    e,
                ));
            }
        };

        let entries = match listing {
            Listing::File(_) => {
                return Err(RefbaseError::new(
                    &format!("path '{}' refers to a single file, not a collection", self.path),
                    ErrorKind::NotACollection,
                ));
            }
            Listing::Directory(entries) => entries,
        };

        let mut refs = Vec::new();
        for entry in &entries {
            if entry.kind != EntryKind::File {
                continue;
            }
            let Some(id) = entry.name.strip_suffix(DOCUMENT_SUFFIX) else {
                log::trace!("skipping non-document entry '{}'", entry.name);
                continue;
            };
            if id.is_empty() {
                continue;
            }
            refs.push(self.doc(id)?);
        }

        let docs = try_join_all(refs.iter().map(|doc| doc.get())).await?;
        Ok(CollectionSnapshot::new(docs))
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.path)
            .field("storage_path", &self.storage_path)
            .finish()
    }
}
