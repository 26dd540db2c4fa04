use std::sync::Arc;

use contacts_migration::LoggingEventPublisher;
use contacts_repository::{EntityStore, PostgresEntityStore};
use tracing::info;

use crate::config::Settings;
use crate::errors::ServiceError;
use crate::server::state::AppState;

/// `Dependencies` holds everything the HTTP server needs to run.
pub struct Dependencies {
    pub state: AppState,
}

impl Dependencies {
    /// Connects to PostgreSQL and builds the migration and sync services.
    ///
    /// Schema migrations are applied first when `settings.run_migrations` is set.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - The store is reachable and every service is wired
    /// * `Err(ServiceError)` - The database could not be reached or migrated
    pub async fn new(settings: &Settings) -> Result<Self, ServiceError> {
        let store = PostgresEntityStore::connect(
            &settings.database_url,
            settings.database_max_connections,
        )
        .await?;
        info!(
            max_connections = settings.database_max_connections,
            "Connected to PostgreSQL"
        );

        if settings.run_migrations {
            store.run_migrations().await?;
        }

        let store: Arc<dyn EntityStore> = Arc::new(store);
        let state = AppState::new(store, Arc::new(LoggingEventPublisher));

        Ok(Dependencies { state })
    }
}
