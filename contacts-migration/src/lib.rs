//! # Contacts Migration
//! This crate reconciles full NOMIS snapshots of contacts and organisations against
//! the entity store and reports how every legacy identifier maps onto a local one.
//! It also carries the per-record sync operations and the outbound event plumbing
//! those operations notify through.
pub mod contact;
pub mod correlation;
pub mod events;
pub mod organisation;
pub mod sync;
pub mod validation;

pub mod errors;

pub use contact::ContactMigrationService;
pub use errors::{MigrationError, PublishError};
pub use events::{
    DomainEventPublisher, LoggingEventPublisher, OutboundEvent, OutboundEventType,
    OutboundEventsService, Source,
};
pub use organisation::OrganisationMigrationService;
pub use sync::SyncService;
