//! Per-record operations used by the NOMIS sync path.
//!
//! Unlike migrations, deletes made here are announced through the outbound events
//! service once the store transaction has committed.
use std::sync::Arc;

use contacts_repository::EntityStore;
use contacts_shared::types::{Contact, Organisation};
use tracing::{info, instrument};

use crate::contact::remove_contact_graph;
use crate::errors::MigrationError;
use crate::events::{OutboundEvent, OutboundEventType, OutboundEventsService, Source};
use crate::organisation::remove_organisation_children;

/// `SyncService` serves the single-record reads and deletes of the sync path.
pub struct SyncService {
    store: Arc<dyn EntityStore>,
    events: OutboundEventsService,
}

impl SyncService {
    /// Creates a new `SyncService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The entity store records are read from and deleted in
    /// * `events` - Where deletions are announced once committed
    pub fn new(store: Arc<dyn EntityStore>, events: OutboundEventsService) -> Self {
        Self { store, events }
    }

    /// Reads back a stored contact.
    #[instrument(skip(self))]
    pub async fn get_contact(&self, contact_id: i64) -> Result<Contact, MigrationError> {
        let mut tx = self.store.begin().await?;
        tx.find_contact(contact_id)
            .await?
            .ok_or_else(|| MigrationError::not_found("Contact", contact_id))
    }

    /// Reads back a stored organisation.
    #[instrument(skip(self))]
    pub async fn get_organisation(
        &self,
        organisation_id: i64,
    ) -> Result<Organisation, MigrationError> {
        let mut tx = self.store.begin().await?;
        tx.find_organisation(organisation_id)
            .await?
            .ok_or_else(|| MigrationError::not_found("Organisation", organisation_id))
    }

    /// Deletes a contact with its whole sub-graph and announces the deletion.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The contact is gone and a `contacts-api.contact.deleted` event was sent
    /// * `Err(MigrationError::NotFound)` - No contact is stored under `contact_id`
    #[instrument(skip(self))]
    pub async fn delete_contact(&self, contact_id: i64) -> Result<(), MigrationError> {
        let mut tx = self.store.begin().await?;
        if tx.find_contact(contact_id).await?.is_none() {
            return Err(MigrationError::not_found("Contact", contact_id));
        }

        remove_contact_graph(tx.as_mut(), contact_id).await?;
        tx.commit().await?;
        info!(contact_id, "Contact deleted");

        self.events
            .send(OutboundEvent::new(
                OutboundEventType::ContactDeleted,
                contact_id,
                Source::Nomis,
            ))
            .await;
        Ok(())
    }

    /// Deletes an organisation, its children and every employment pointing at it.
    #[instrument(skip(self))]
    pub async fn delete_organisation(&self, organisation_id: i64) -> Result<(), MigrationError> {
        let mut tx = self.store.begin().await?;
        if tx.find_organisation(organisation_id).await?.is_none() {
            return Err(MigrationError::not_found("Organisation", organisation_id));
        }

        let employments = tx.delete_employments_for_organisation(organisation_id).await?;
        remove_organisation_children(tx.as_mut(), organisation_id).await?;
        tx.delete_organisation(organisation_id).await?;
        tx.commit().await?;
        info!(organisation_id, employments, "Organisation deleted");

        self.events
            .send(OutboundEvent::new(
                OutboundEventType::OrganisationDeleted,
                organisation_id,
                Source::Nomis,
            ))
            .await;
        Ok(())
    }
}
