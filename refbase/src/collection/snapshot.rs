use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-side view of a single document.
///
/// `exists` is `false` and `data` is `None` for a document that has never
/// been written (or has been deleted); that is a normal outcome, not an
/// error. The snapshot never carries the version token, so callers cannot
/// perform their own compare-and-swap writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub id: String,
    pub exists: bool,
    pub data: Option<Value>,
    pub path: String,
}

impl DocumentSnapshot {
    pub(crate) fn present(id: &str, path: &str, data: Value) -> Self {
        DocumentSnapshot {
            id: id.to_string(),
            exists: true,
            data: Some(data),
            path: path.to_string(),
        }
    }

    pub(crate) fn absent(id: &str, path: &str) -> Self {
        DocumentSnapshot {
            id: id.to_string(),
            exists: false,
            data: None,
            path: path.to_string(),
        }
    }
}

/// Read-side view of a collection.
///
/// Documents appear in the backing store's listing order, which is not
/// guaranteed stable across store implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub docs: Vec<DocumentSnapshot>,
    pub empty: bool,
}

impl CollectionSnapshot {
    pub(crate) fn new(docs: Vec<DocumentSnapshot>) -> Self {
        CollectionSnapshot {
            empty: docs.is_empty(),
            docs,
        }
    }
}
