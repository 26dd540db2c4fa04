//! Contacts API Library
//!
//! HTTP boundary of the contacts service: configuration from the environment,
//! dependency wiring, error-to-response mapping and the axum router exposing the
//! migrate and sync endpoints.

pub mod config;
pub mod errors;
pub mod server;

pub use config::{Dependencies, Settings};
pub use errors::{ApiError, ConfigError, ServiceError};
