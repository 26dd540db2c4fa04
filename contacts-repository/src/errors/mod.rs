//! Error types for the contacts repository.
//! Consolidates and re-exports error types raised by store implementations.
mod repository;

pub use repository::RepositoryError;
