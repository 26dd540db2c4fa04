//! This module defines the `OrganisationMigrationService`, which reconciles an
//! organisation snapshot from NOMIS against the entity store.
//!
//! Unlike contacts, an organisation that is already stored keeps its row: the row is
//! updated in place while every child record is deleted and created again.
mod records;

use std::sync::Arc;

use chrono::Utc;
use contacts_repository::{EntityStore, RepositoryError, StoreTransaction};
use contacts_shared::types::{
    ElementType, IdPair, MigrateOrganisationRequest, MigrateOrganisationResponse,
};
use tracing::{debug, info, instrument};

use crate::correlation::OrganisationCorrelation;
use crate::errors::MigrationError;
use crate::validation::validate_organisation;

/// `OrganisationMigrationService` reconciles organisation snapshots against the entity store.
pub struct OrganisationMigrationService {
    store: Arc<dyn EntityStore>,
}

impl OrganisationMigrationService {
    /// Creates a new `OrganisationMigrationService`.
    ///
    /// # Arguments
    ///
    /// * `store` - The entity store the organisations are written to
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Migrates one organisation.
    ///
    /// The organisation id is always the NOMIS corporate id. Child ids are freshly
    /// generated on every call.
    ///
    /// # Returns
    ///
    /// * `Ok(MigrateOrganisationResponse)` - Legacy and local ids of every record created
    /// * `Err(MigrationError)` - Nothing was written
    #[instrument(skip(self, request), fields(organisation_id = request.nomis_corporate_id))]
    pub async fn migrate_organisation(
        &self,
        request: &MigrateOrganisationRequest,
    ) -> Result<MigrateOrganisationResponse, MigrationError> {
        validate_organisation(request)?;

        let now = Utc::now().naive_utc();
        let organisation_id = request.nomis_corporate_id;
        let organisation = records::organisation(request, now);
        let mut tx = self.store.begin().await?;

        if tx.find_organisation(organisation_id).await?.is_some() {
            info!(organisation_id, "Organisation already migrated, updating it");
            remove_organisation_children(tx.as_mut(), organisation_id).await?;
            tx.update_organisation(&organisation).await?;
        } else {
            tx.insert_organisation_with_id(&organisation).await?;
        }

        let mut pairs = OrganisationCorrelation::new(IdPair::new(
            ElementType::Organisation,
            organisation_id,
            organisation_id,
        ));

        for organisation_type in &request.organisation_types {
            let id = tx
                .insert_organisation_type(&records::organisation_type(
                    organisation_id,
                    organisation_type,
                    now,
                ))
                .await?;
            // NOMIS keys organisation types by the corporate id and the type code,
            // so the stored row id is the only per-type key.
            pairs.types.push(IdPair::new(
                ElementType::OrganisationType,
                organisation_id,
                id,
            ));
        }

        for phone in &request.phone_numbers {
            let id = tx
                .insert_organisation_phone(&records::phone(organisation_id, phone, now))
                .await?;
            pairs.phones.push(IdPair::new(
                ElementType::OrganisationPhone,
                phone.nomis_phone_id,
                id,
            ));
        }

        for email in &request.email_addresses {
            let id = tx
                .insert_organisation_email(&records::email(organisation_id, email, now))
                .await?;
            pairs.emails.push(IdPair::new(
                ElementType::OrganisationEmail,
                email.nomis_email_address_id,
                id,
            ));
        }

        for web_address in &request.web_addresses {
            let id = tx
                .insert_organisation_web_address(&records::web_address(
                    organisation_id,
                    web_address,
                    now,
                ))
                .await?;
            pairs.web_addresses.push(IdPair::new(
                ElementType::OrganisationWeb,
                web_address.nomis_web_address_id,
                id,
            ));
        }

        for address in &request.addresses {
            let address_id = tx
                .insert_organisation_address(&records::address(organisation_id, address, now))
                .await?;
            pairs.addresses.push(IdPair::new(
                ElementType::OrganisationAddress,
                address.nomis_address_id,
                address_id,
            ));

            for phone in &address.phone_numbers {
                let phone_id = tx
                    .insert_organisation_phone(&records::phone(organisation_id, phone, now))
                    .await?;
                let link_id = tx
                    .insert_organisation_address_phone(&records::address_phone(
                        organisation_id,
                        address_id,
                        phone_id,
                        phone,
                        now,
                    ))
                    .await?;
                pairs.address_phones.record(
                    address.nomis_address_id,
                    IdPair::new(
                        ElementType::OrganisationAddressPhone,
                        phone.nomis_phone_id,
                        link_id,
                    ),
                );
            }
        }

        tx.commit().await?;
        info!(organisation_id, "Organisation migrated");

        Ok(pairs.into_response())
    }
}

/// Deletes every record owned by an organisation, leaving the organisation row itself.
pub(crate) async fn remove_organisation_children(
    tx: &mut dyn StoreTransaction,
    organisation_id: i64,
) -> Result<(), RepositoryError> {
    let address_phones = tx.delete_organisation_address_phones(organisation_id).await?;
    let addresses = tx.delete_organisation_addresses(organisation_id).await?;
    let phones = tx.delete_organisation_phones(organisation_id).await?;
    let emails = tx.delete_organisation_emails(organisation_id).await?;
    let web_addresses = tx.delete_organisation_web_addresses(organisation_id).await?;
    let types = tx.delete_organisation_types(organisation_id).await?;

    debug!(
        organisation_id,
        address_phones,
        addresses,
        phones,
        emails,
        web_addresses,
        types,
        "Removed organisation children"
    );
    Ok(())
}
