//! This module defines the `ContactMigrationService`, which replaces a contact and its
//! whole sub-graph with the snapshot sent by NOMIS.
//!
//! A migration runs in a single store transaction: an existing contact with the same
//! id is removed children first, the contact is re-created under the NOMIS person id,
//! and every sub-record is created with a fresh local id. No outbound events are sent
//! for migrated data.
mod records;

use std::sync::Arc;

use chrono::Utc;
use contacts_repository::{EntityStore, RepositoryError, StoreTransaction};
use contacts_shared::types::{ElementType, IdPair, MigrateContactRequest, MigrateContactResponse};
use tracing::{debug, info, instrument};

use crate::correlation::ContactCorrelation;
use crate::errors::MigrationError;
use crate::validation::validate_contact;

pub(crate) use records::code;

/// `ContactMigrationService` reconciles contact snapshots against the entity store.
pub struct ContactMigrationService {
    store: Arc<dyn EntityStore>,
}

impl ContactMigrationService {
    /// Creates a new `ContactMigrationService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The entity store the contacts are written to
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Migrates one contact, replacing any contact already stored under the same id.
    ///
    /// # Arguments
    ///
    /// * `request` - The full NOMIS snapshot of the contact
    ///
    /// # Returns
    ///
    /// * `Ok(MigrateContactResponse)` - Legacy and local ids of every record created
    /// * `Err(MigrationError::Validation)` - The request broke a field rule; nothing was written
    /// * `Err(MigrationError::NotFound)` - An employment names an organisation that was never migrated
    /// * `Err(MigrationError::Repository)` - The store failed; the transaction was rolled back
    #[instrument(skip(self, request), fields(person_id = request.person_id))]
    pub async fn migrate_contact(
        &self,
        request: &MigrateContactRequest,
    ) -> Result<MigrateContactResponse, MigrationError> {
        validate_contact(request)?;

        let now = Utc::now().naive_utc();
        let contact_id = request.person_id;
        let mut tx = self.store.begin().await?;

        if tx.find_contact(contact_id).await?.is_some() {
            info!(contact_id, "Contact already migrated, replacing it");
            remove_contact_graph(tx.as_mut(), contact_id).await?;
        }

        tx.insert_contact_with_id(&records::contact(request, now))
            .await?;
        let mut pairs =
            ContactCorrelation::new(IdPair::new(ElementType::Contact, contact_id, contact_id));

        for phone in &request.phone_numbers {
            let id = tx
                .insert_contact_phone(&records::phone(contact_id, phone, now))
                .await?;
            pairs
                .phones
                .push(IdPair::new(ElementType::Phone, phone.phone_id, id));
        }

        for address in &request.addresses {
            let address_id = tx
                .insert_contact_address(&records::address(contact_id, address, now))
                .await?;
            pairs.addresses.push(IdPair::new(
                ElementType::Address,
                address.address_id,
                address_id,
            ));

            for phone in &address.phone_numbers {
                let phone_id = tx
                    .insert_contact_phone(&records::phone(contact_id, phone, now))
                    .await?;
                let link_id = tx
                    .insert_contact_address_phone(&records::address_phone(
                        contact_id, address_id, phone_id, phone, now,
                    ))
                    .await?;
                pairs.address_phones.record(
                    address.address_id,
                    IdPair::new(ElementType::AddressPhone, phone.phone_id, link_id),
                );
            }
        }

        for email in &request.email_addresses {
            let id = tx
                .insert_contact_email(&records::email(contact_id, email, now))
                .await?;
            pairs
                .emails
                .push(IdPair::new(ElementType::Email, email.email_address_id, id));
        }

        for identifier in &request.identifiers {
            let id = tx
                .insert_contact_identity(&records::identity(contact_id, identifier, now))
                .await?;
            pairs
                .identities
                .push(IdPair::new(ElementType::Identity, identifier.sequence, id));
        }

        for restriction in &request.restrictions {
            let id = tx
                .insert_contact_restriction(&records::restriction(contact_id, restriction, now))
                .await?;
            pairs
                .restrictions
                .push(IdPair::new(ElementType::Restriction, restriction.id, id));
        }

        for employment in &request.employments {
            let organisation_id = employment.corporate.id;
            if !tx
                .exists(ElementType::Organisation, organisation_id)
                .await?
            {
                return Err(MigrationError::not_found("Organisation", organisation_id));
            }
            let id = tx
                .insert_contact_employment(&records::employment(contact_id, employment, now))
                .await?;
            pairs
                .employments
                .push(IdPair::new(ElementType::Employment, employment.sequence, id));
        }

        for relationship in &request.contacts {
            let prisoner_contact_id = tx
                .insert_prisoner_contact(&records::prisoner_contact(contact_id, relationship, now))
                .await?;
            pairs.relationships.push(IdPair::new(
                ElementType::PrisonerContact,
                relationship.id,
                prisoner_contact_id,
            ));

            for restriction in &relationship.restrictions {
                let id = tx
                    .insert_prisoner_contact_restriction(&records::prisoner_contact_restriction(
                        prisoner_contact_id,
                        restriction,
                        now,
                    ))
                    .await?;
                pairs.relationship_restrictions.record(
                    relationship.id,
                    IdPair::new(ElementType::PrisonerContactRestriction, restriction.id, id),
                );
            }
        }

        tx.commit().await?;
        info!(contact_id, "Contact migrated");

        Ok(pairs.into_response(request.last_name.clone(), request.date_of_birth))
    }
}

/// Deletes a contact and every record hanging off it, deepest records first.
///
/// Deleting a contact that has no rows of some kind is not an error.
pub(crate) async fn remove_contact_graph(
    tx: &mut dyn StoreTransaction,
    contact_id: i64,
) -> Result<(), RepositoryError> {
    let address_phones = tx.delete_contact_address_phones(contact_id).await?;
    let addresses = tx.delete_contact_addresses(contact_id).await?;
    let phones = tx.delete_contact_phones(contact_id).await?;
    let emails = tx.delete_contact_emails(contact_id).await?;
    let identities = tx.delete_contact_identities(contact_id).await?;
    let restrictions = tx.delete_contact_restrictions(contact_id).await?;
    let employments = tx.delete_contact_employments(contact_id).await?;

    let mut relationship_restrictions = 0;
    for prisoner_contact_id in tx.find_prisoner_contact_ids(contact_id).await? {
        relationship_restrictions += tx
            .delete_prisoner_contact_restrictions(prisoner_contact_id)
            .await?;
    }
    let relationships = tx.delete_prisoner_contacts(contact_id).await?;
    tx.delete_contact(contact_id).await?;

    debug!(
        contact_id,
        address_phones,
        addresses,
        phones,
        emails,
        identities,
        restrictions,
        employments,
        relationships,
        relationship_restrictions,
        "Removed contact graph"
    );
    Ok(())
}
