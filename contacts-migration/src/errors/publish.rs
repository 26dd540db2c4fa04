//! Error types for the outbound event publishers.
use thiserror::Error;

/// Represents errors raised by a `DomainEventPublisher`.
#[derive(Debug, Error, Clone)]
pub enum PublishError {
    #[error("Error serializing event: {0}")]
    Serialization(String),
    #[error("Error delivering event: {0}")]
    Delivery(String),
}
