use crate::common::constants::DOCUMENT_SUFFIX;
use crate::errors::{ErrorKind, RefbaseError, RefbaseResult};

/// Splits a document path into its owning collection path and document id.
///
/// A document path alternates collection segments and document ids, so a
/// valid path has an even segment count of at least 2. The last segment is
/// the document id; everything before it, joined back with `/`, is the
/// owning collection path.
///
/// # Errors
///
/// Returns `ErrorKind::InvalidPath` for odd-length paths, bare ids with no
/// owning collection, and paths containing empty segments.
///
/// # Examples
///
/// ```rust
/// use refbase::common::paths::split_document_path;
///
/// let (collection, id) = split_document_path("users/alice").unwrap();
/// assert_eq!(collection, "users");
/// assert_eq!(id, "alice");
///
/// let (collection, id) = split_document_path("users/alice/posts/p1").unwrap();
/// assert_eq!(collection, "users/alice/posts");
/// assert_eq!(id, "p1");
/// ```
pub fn split_document_path(path: &str) -> RefbaseResult<(String, String)> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
        return Err(RefbaseError::new(
            &format!(
                "invalid document path '{}': expected alternating collection/id pairs",
                path
            ),
            ErrorKind::InvalidPath,
        ));
    }
    let id = segments[segments.len() - 1].to_string();
    let collection_path = segments[..segments.len() - 1].join("/");
    Ok((collection_path, id))
}

/// Validates a collection path.
///
/// Any non-empty slash-delimited sequence without empty segments is a valid
/// collection path. An odd segment count is normal for sub-collections
/// nested under a document.
pub fn validate_collection_path(path: &str) -> RefbaseResult<()> {
    if path.is_empty() || path.split('/').any(|s| s.is_empty()) {
        return Err(RefbaseError::new(
            &format!("invalid collection path '{}'", path),
            ErrorKind::InvalidPath,
        ));
    }
    Ok(())
}

/// Returns the storage-facing path for a collection.
///
/// The configured base path is prepended unless it is empty.
pub fn collection_storage_path(base_path: &str, collection_path: &str) -> String {
    if base_path.is_empty() {
        collection_path.to_string()
    } else {
        format!("{}/{}", base_path, collection_path)
    }
}

/// Returns the storage-facing path for a document: `{base}/{collection}/{id}.json`.
pub fn document_storage_path(base_path: &str, collection_path: &str, id: &str) -> String {
    format!(
        "{}/{}{}",
        collection_storage_path(base_path, collection_path),
        id,
        DOCUMENT_SUFFIX
    )
}
