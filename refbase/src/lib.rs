//! # Refbase - Document Store over Version-Controlled Content Hosts
//!
//! Refbase is a document-store abstraction: collections of JSON documents,
//! addressed by path, backed by a branch-scoped, version-controlled content
//! host. Concurrency is optimistic: every stored item carries an opaque
//! version token, every mutation pre-reads to discover it, and the store
//! rejects writes presenting a stale token instead of silently clobbering
//! concurrent changes.
//!
//! ## Key Features
//!
//! - **Path-Addressed Documents**: `collection/id` paths, arbitrarily
//!   nestable (`users/alice/posts/p1`)
//! - **Optimistic Concurrency**: stale writers observe a conflict error;
//!   nothing is lost silently, nothing is auto-retried
//! - **Shallow Merge Updates**: `update` merges top-level object fields;
//!   `set` fully replaces
//! - **Idempotent Deletes**: deleting an absent document succeeds
//! - **Concurrent Collection Reads**: listing fans out per-document fetches
//!   and joins them all
//! - **Pluggable Stores**: any backing host behind the
//!   `ContentStoreProvider` trait; an in-memory store ships for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use refbase::refbase::Refbase;
//! use refbase::store::memory::InMemoryStore;
//! use serde_json::json;
//!
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Refbase::builder()
//!     .owner("acme")
//!     .repo("content")
//!     .store(InMemoryStore::new())
//!     .connect()?;
//!
//! let users = db.collection("users")?;
//! users.doc("alice")?.set(json!({"name": "Alice", "age": 30})).await?;
//! users.doc("alice")?.update(json!({"age": 31})).await?;
//!
//! let everyone = users.get().await?;
//! assert!(!everyone.empty);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Collection and document handles, snapshots, options
//! - [`common`] - Constants and the pure path resolver
//! - [`errors`] - Error types and result definitions
//! - [`refbase`] - Core database interface
//! - [`refbase_builder`] - Database builder
//! - [`refbase_config`] - Shared database configuration
//! - [`store`] - Backing store abstractions and the in-memory provider

pub mod collection;
pub mod common;
pub mod errors;
pub mod refbase;
pub mod refbase_builder;
pub mod refbase_config;
pub mod store;
