//! Error types for the migration and sync services.
use contacts_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur while migrating or syncing a record.
///
/// Every variant aborts the surrounding store transaction; nothing from a failed call
/// is committed.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The request broke one or more field rules. Messages are sorted and unique.
    #[error("Validation failure(s): {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl MigrationError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        MigrationError::NotFound(format!("{entity} with id {id} not found"))
    }
}
