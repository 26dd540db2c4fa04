//! In-memory implementation of the entity store.
//!
//! Rows live in ordered maps keyed by their identifier. A transaction holds the store's
//! owned async mutex for its whole lifetime and works on a private copy of every table,
//! which replaces the shared tables only on `commit`. Referential and uniqueness rules
//! mirror the PostgreSQL schema, so constraint failures surface as the same
//! `RepositoryError` variants.
mod store;

pub use store::{InMemoryEntityStore, InMemoryStoreTransaction};
