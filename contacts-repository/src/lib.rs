//! # Contacts Repository
//! This crate provides the storage traits for contacts, organisations and their
//! sub-records, together with a PostgreSQL implementation and an in-memory
//! implementation that honours the same transactional and referential rules.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{EntityStore, StoreTransaction};
pub use memory::InMemoryEntityStore;
pub use postgres::PostgresEntityStore;
