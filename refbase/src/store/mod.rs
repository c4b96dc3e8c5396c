//! Backing store abstractions.
//!
//! The backing store is a branch-scoped, version-controlled content host,
//! consumed through the `ContentStoreProvider` trait. The engine never talks
//! to a concrete host directly; it discovers current state through `read`,
//! proves that state back to the store through version tokens on `write` and
//! `remove`, and aggregates `list` results into collections.
//!
//! # Store Providers
//!
//! Providers implement `ContentStoreProvider` and are handed to the builder.
//! Refbase includes:
//! - **In-Memory Store**: `InMemoryStore` for testing and temporary data
//!
//! A provider for a remote host owns its own transport, authentication, and
//! retry policy; this crate only propagates what the provider returns.
//!
//! # Optimistic Concurrency
//!
//! Every stored item carries an opaque `VersionToken` assigned on write.
//! A write or remove that presents a stale token must fail with
//! `ErrorKind::Conflict`; absence must be signalled with `ErrorKind::NotFound`.

mod content_store;
pub mod memory;

pub use content_store::*;
