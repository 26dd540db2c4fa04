use std::sync::Arc;

use contacts_migration::{
    ContactMigrationService, DomainEventPublisher, OrganisationMigrationService,
    OutboundEventsService, SyncService,
};
use contacts_repository::EntityStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactMigrationService>,
    pub organisations: Arc<OrganisationMigrationService>,
    pub sync: Arc<SyncService>,
}

impl AppState {
    /// Builds every service over one store and one event publisher.
    pub fn new(store: Arc<dyn EntityStore>, publisher: Arc<dyn DomainEventPublisher>) -> Self {
        let events = OutboundEventsService::new(publisher);

        Self {
            contacts: Arc::new(ContactMigrationService::new(store.clone())),
            organisations: Arc::new(OrganisationMigrationService::new(store.clone())),
            sync: Arc::new(SyncService::new(store, events)),
        }
    }
}
