//! PostgreSQL implementation of the entity store.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - One `sqlx::Transaction` per `StoreTransaction`, rolled back on drop
//! - Explicit-key inserts for contacts and organisations, identity columns for the rest
//! - Embedded schema migrations (`src/postgres/migrations`)
mod store;
mod transaction;

pub use store::PostgresEntityStore;
pub use transaction::PostgresStoreTransaction;
