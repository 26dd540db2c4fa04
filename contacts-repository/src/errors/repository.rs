use thiserror::Error;

/// Represents errors that can occur within the entity store.
///
/// Constraint failures are split out of the generic database error so callers can tell
/// a referential problem in the submitted data from an infrastructure failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[source] sqlx::Error),

    #[error("Schema migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Unique violation: {0}")]
    UniqueViolation(String),
}

impl RepositoryError {
    /// Whether the error was raised by a data constraint rather than the backend itself.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::ForeignKeyViolation(_) | RepositoryError::UniqueViolation(_)
        )
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKeyViolation(db_err.message().to_string());
            }
            if db_err.is_unique_violation() {
                return RepositoryError::UniqueViolation(db_err.message().to_string());
            }
        }
        RepositoryError::DatabaseError(err)
    }
}
