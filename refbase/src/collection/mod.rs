//! Collections and document handles.
//!
//! A collection is a directory-like namespace of JSON documents in the
//! backing store; a document is one JSON-valued file addressed by
//! collection + id. Handles are cheap value objects carrying their resolved
//! paths and a reference to the shared configuration; they hold no other
//! state and may be constructed freely.

mod collection;
mod document_ref;
mod set_options;
mod snapshot;

pub use collection::*;
pub use document_ref::*;
pub use set_options::*;
pub use snapshot::*;
