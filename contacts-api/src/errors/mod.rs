//! Error types for the Contacts API application.
//! `ApiError` covers a single request, `ConfigError` and `ServiceError` cover startup.
mod api;

pub use api::{ApiError, ErrorResponse};

use contacts_repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}
