use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::errors::RepositoryError;
use crate::interfaces::{EntityStore, StoreTransaction};
use crate::postgres::PostgresStoreTransaction;

/// PostgreSQL-backed entity store.
///
/// Hands out one database transaction per `begin` call. The pool is cheap to clone, so
/// the store can be shared behind an `Arc` by every service in the process.
pub struct PostgresEntityStore {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresEntityStore {
    /// Creates a store over an already configured pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - Connection pool pointing at a database carrying the contacts schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    ///
    /// # Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    /// * `max_connections` - Upper bound of pooled connections
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresEntityStore)` - Ready-to-use store
    /// * `Err(RepositoryError)` - The database could not be reached
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Applies the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./src/postgres/migrations")
            .run(&self.pool)
            .await?;
        info!("Contacts schema migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, RepositoryError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresStoreTransaction::new(tx)))
    }
}
