use crate::collection::{DocumentSnapshot, SetOptions};
use crate::common::paths::document_storage_path;
use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};
use crate::refbase_config::RefbaseConfig;
use crate::store::{ContentEntry, ContentStore};
use serde_json::Value;
use std::fmt::{Debug, Formatter};

/// A handle to a single document in a Refbase database.
///
/// The handle is a pure value object: it carries its resolved paths and a
/// reference to the shared configuration, nothing else. It exists whether or
/// not the document does; the document itself is created on first `set`.
///
/// Every mutation first reads the storage path to discover the current
/// version token, because the backing store demands proof-of-current-state
/// to accept a write or delete. The read and the write remain two separate
/// store calls, so a conflicting write landing between them is still
/// possible; it surfaces as `ErrorKind::Conflict` and is never retried here.
///
/// # Examples
///
/// ```rust,ignore
/// use serde_json::json;
///
/// # async fn example(db: refbase::refbase::Refbase) -> refbase::errors::RefbaseResult<()> {
/// let doc = db.doc("users/alice")?;
/// doc.set(json!({"name": "Alice", "age": 30})).await?;
/// doc.update(json!({"age": 31})).await?;
///
/// let snapshot = doc.get().await?;
/// assert!(snapshot.exists);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DocumentRef {
    config: RefbaseConfig,
    collection_path: String,
    id: String,
    path: String,
    storage_path: String,
}

impl DocumentRef {
    pub(crate) fn new(
        config: RefbaseConfig,
        collection_path: &str,
        id: &str,
    ) -> RefbaseResult<Self> {
        if id.is_empty() || id.contains('/') {
            return Err(RefbaseError::new(
                &format!("invalid document id '{}'", id),
                ErrorKind::InvalidPath,
            ));
        }
        let path = format!("{}/{}", collection_path, id);
        let storage_path = document_storage_path(config.base_path(), collection_path, id);
        Ok(DocumentRef {
            config,
            collection_path: collection_path.to_string(),
            id: id.to_string(),
            path,
            storage_path,
        })
    }

    /// The document id (the last segment of the document path).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The full document path, `{collection_path}/{id}`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path of the owning collection.
    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }

    /// Reads the document.
    ///
    /// An absent document yields a snapshot with `exists: false`; that is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// `ErrorKind::CorruptDocument` when the stored content is not valid
    /// JSON; `ErrorKind::DocumentRead` (cause attached) for any other store
    /// failure.
    pub async fn get(&self) -> RefbaseResult<DocumentSnapshot> {
        let store = self.config.content_store()?;
        log::debug!("reading document '{}'", self.path);
        match store.read(&self.storage_path, self.config.branch()).await {
            Ok(entry) => {
                let data = self.parse_stored(&entry)?;
                Ok(DocumentSnapshot::present(&self.id, &self.path, data))
            }
            Err(e) if e.kind() == &ErrorKind::NotFound => {
                Ok(DocumentSnapshot::absent(&self.id, &self.path))
            }
            Err(e) => Err(RefbaseError::new_with_cause(
                &format!("failed to read document '{}'", self.path),
                ErrorKind::DocumentRead,
                e,
            )),
        }
    }

    /// Writes the document, fully replacing any existing content.
    pub async fn set(&self, data: Value) -> RefbaseResult<()> {
        self.set_with_options(data, &SetOptions::default()).await
    }

    /// Merges `data` into the existing document (shallow, top-level).
    ///
    /// Equivalent to `set_with_options(data, &SetOptions::merge())`. On a
    /// non-existent document this behaves as a plain `set`.
    pub async fn update(&self, data: Value) -> RefbaseResult<()> {
        self.set_with_options(data, &SetOptions::merge()).await
    }

    /// Writes the document with explicit options.
    ///
    /// The pre-read discovers the current version token; the write presents
    /// it back to the store, which rejects the operation with
    /// `ErrorKind::Conflict` if the token has gone stale in the meantime.
    /// Conflicts propagate to the caller unwrapped and are never retried
    /// here.
    ///
    /// # Errors
    ///
    /// `ErrorKind::Conflict` on a stale token; `ErrorKind::CorruptDocument`
    /// when a merge finds unparseable stored content;
    /// `ErrorKind::DocumentWrite` (cause attached) for any other failure.
    pub async fn set_with_options(&self, data: Value, options: &SetOptions) -> RefbaseResult<()> {
        let store = self.config.content_store()?;
        let branch = self.config.branch();
        let current = self
            .read_current(&store, branch, ErrorKind::DocumentWrite)
            .await?;

        let content = match (&current, options.merge) {
            (Some(entry), true) => {
                let existing = self.parse_stored(entry)?;
                shallow_merge(existing, data)
            }
            _ => data,
        };
        let bytes = serde_json::to_vec_pretty(&content).map_err(|e| {
            RefbaseError::new_with_cause(
                &format!("failed to serialize document '{}'", self.path),
                ErrorKind::DocumentWrite,
                RefbaseError::new(&e.to_string(), ErrorKind::DocumentWrite),
            )
        })?;

        log::debug!(
            "writing document '{}' (merge: {}, exists: {})",
            self.path,
            options.merge,
            current.is_some()
        );
        let message = format!("set document {}", self.path);
        let expected = current.as_ref().map(|entry| &entry.version);
        match store
            .write(&self.storage_path, &bytes, &message, branch, expected)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == &ErrorKind::Conflict => Err(e),
            Err(e) => Err(RefbaseError::new_with_cause(
                &format!("failed to write document '{}'", self.path),
                ErrorKind::DocumentWrite,
                e,
            )),
        }
    }

    /// Deletes the document.
    ///
    /// Deleting an absent document succeeds, both when the pre-read finds
    /// nothing and when the remove itself loses a race with a concurrent
    /// delete.
    ///
    /// # Errors
    ///
    /// `ErrorKind::Conflict` on a stale token; `ErrorKind::DocumentDelete`
    /// (cause attached) for any other failure.
    pub async fn delete(&self) -> RefbaseResult<()> {
        let store = self.config.content_store()?;
        let branch = self.config.branch();
        let Some(current) = self
            .read_current(&store, branch, ErrorKind::DocumentDelete)
            .await?
        else {
            return Ok(());
        };

        log::debug!("deleting document '{}'", self.path);
        let message = format!("delete document {}", self.path);
        match store
            .remove(&self.storage_path, &message, branch, &current.version)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == &ErrorKind::NotFound => Ok(()),
            Err(e) if e.kind() == &ErrorKind::Conflict => Err(e),
            Err(e) => Err(RefbaseError::new_with_cause(
                &format!("failed to delete document '{}'", self.path),
                ErrorKind::DocumentDelete,
                e,
            )),
        }
    }

    /// Pre-reads current state, mapping absence to `None` and any other
    /// failure into the given wrapper kind.
    async fn read_current(
        &self,
        store: &ContentStore,
        branch: &str,
        wrap_kind: ErrorKind,
    ) -> RefbaseResult<Option<ContentEntry>> {
        match store.read(&self.storage_path, branch).await {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.kind() == &ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RefbaseError::new_with_cause(
                &format!("failed to read current state of document '{}'", self.path),
                wrap_kind,
                e,
            )),
        }
    }

    fn parse_stored(&self, entry: &ContentEntry) -> RefbaseResult<Value> {
        serde_json::from_slice(&entry.content).map_err(|e| {
            RefbaseError::new_with_cause(
                &format!("stored content of document '{}' is not valid JSON", self.path),
                ErrorKind::CorruptDocument,
                RefbaseError::new(&e.to_string(), ErrorKind::CorruptDocument),
            )
        })
    }
}

impl Debug for DocumentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRef")
            .field("path", &self.path)
            .field("storage_path", &self.storage_path)
            .finish()
    }
}

/// Shallow top-level merge of two JSON values.
///
/// Object against object merges field-wise with incoming keys winning; any
/// other combination is a full replacement by the incoming value. Nested
/// objects are not merged recursively.
pub(crate) fn shallow_merge(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(patch)) => {
            for (key, value) in patch {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}
