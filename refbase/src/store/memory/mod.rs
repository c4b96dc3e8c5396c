//! In-memory store provider for testing and temporary use.

mod store;

pub use store::*;
