//! Common constants and pure helpers.
//!
//! This module holds the storage-layout constants and the path resolver:
//! pure functions mapping collection/document identifiers to the paths used
//! against the backing store. Nothing here performs I/O.

pub mod constants;
pub mod paths;

pub use constants::*;
pub use paths::*;
