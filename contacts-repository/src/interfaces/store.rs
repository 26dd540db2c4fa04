//! This module defines the `EntityStore` and `StoreTransaction` traits, which abstract
//! the persistence of contacts, organisations and every record hanging off them.
//!
//! All reads and writes go through a `StoreTransaction`. Nothing a transaction does is
//! visible to other callers until `commit` succeeds, and dropping a transaction without
//! committing discards every change it made.
use contacts_shared::types::{
    Contact, ContactAddress, ContactAddressPhone, ContactEmail, ContactEmployment,
    ContactIdentity, ContactPhone, ContactRestriction, ElementType, Organisation,
    OrganisationAddress, OrganisationAddressPhone, OrganisationEmail, OrganisationPhone,
    OrganisationType, OrganisationWebAddress, PrisonerContact, PrisonerContactRestriction,
};

use crate::errors::RepositoryError;

/// Entry point to the store.
#[async_trait::async_trait]
pub trait EntityStore: Send + Sync {
    /// Opens a new transaction.
    ///
    /// # Returns
    ///
    /// * `Ok(Box<dyn StoreTransaction>)` - An open transaction; dropping it rolls back
    /// * `Err(RepositoryError)` - The backend could not start a transaction
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, RepositoryError>;
}

/// A unit of work against the store.
///
/// Root records (contacts and organisations) are inserted under a caller-supplied key
/// through the `*_with_id` operations. Every other record receives a generated key,
/// returned by its `insert_*` operation.
///
/// `delete_*` operations remove every matching row and report how many were removed.
/// Deleting zero rows is not an error. Deleting a row that other rows still reference
/// is a `ForeignKeyViolation`, so callers must remove children first.
#[async_trait::async_trait]
pub trait StoreTransaction: Send {
    // ---------------------------------------------------------------------
    // Contacts
    // ---------------------------------------------------------------------

    async fn find_contact(&mut self, contact_id: i64) -> Result<Option<Contact>, RepositoryError>;

    /// Inserts a contact using `contact.contact_id` verbatim as its key.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The contact was stored under the supplied key
    /// * `Err(RepositoryError::UniqueViolation)` - A contact with that key already exists
    async fn insert_contact_with_id(&mut self, contact: &Contact) -> Result<(), RepositoryError>;

    async fn insert_contact_phone(&mut self, phone: &ContactPhone) -> Result<i64, RepositoryError>;

    async fn insert_contact_address(
        &mut self,
        address: &ContactAddress,
    ) -> Result<i64, RepositoryError>;

    /// Links an existing phone to an existing address of the same contact.
    async fn insert_contact_address_phone(
        &mut self,
        address_phone: &ContactAddressPhone,
    ) -> Result<i64, RepositoryError>;

    async fn insert_contact_email(&mut self, email: &ContactEmail) -> Result<i64, RepositoryError>;

    async fn insert_contact_identity(
        &mut self,
        identity: &ContactIdentity,
    ) -> Result<i64, RepositoryError>;

    async fn insert_contact_restriction(
        &mut self,
        restriction: &ContactRestriction,
    ) -> Result<i64, RepositoryError>;

    /// Inserts an employment. The referenced organisation must already exist.
    async fn insert_contact_employment(
        &mut self,
        employment: &ContactEmployment,
    ) -> Result<i64, RepositoryError>;

    async fn insert_prisoner_contact(
        &mut self,
        prisoner_contact: &PrisonerContact,
    ) -> Result<i64, RepositoryError>;

    async fn insert_prisoner_contact_restriction(
        &mut self,
        restriction: &PrisonerContactRestriction,
    ) -> Result<i64, RepositoryError>;

    /// Lists the keys of every prisoner relationship held by a contact, in key order.
    async fn find_prisoner_contact_ids(
        &mut self,
        contact_id: i64,
    ) -> Result<Vec<i64>, RepositoryError>;

    async fn delete_contact_address_phones(&mut self, contact_id: i64)
    -> Result<u64, RepositoryError>;

    async fn delete_contact_addresses(&mut self, contact_id: i64) -> Result<u64, RepositoryError>;

    async fn delete_contact_phones(&mut self, contact_id: i64) -> Result<u64, RepositoryError>;

    async fn delete_contact_emails(&mut self, contact_id: i64) -> Result<u64, RepositoryError>;

    async fn delete_contact_identities(&mut self, contact_id: i64)
    -> Result<u64, RepositoryError>;

    async fn delete_contact_restrictions(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_contact_employments(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError>;

    /// Deletes the restrictions of one prisoner relationship.
    async fn delete_prisoner_contact_restrictions(
        &mut self,
        prisoner_contact_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_prisoner_contacts(&mut self, contact_id: i64) -> Result<u64, RepositoryError>;

    async fn delete_contact(&mut self, contact_id: i64) -> Result<u64, RepositoryError>;

    // ---------------------------------------------------------------------
    // Organisations
    // ---------------------------------------------------------------------

    async fn find_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Option<Organisation>, RepositoryError>;

    /// Inserts an organisation using `organisation.organisation_id` verbatim as its key.
    async fn insert_organisation_with_id(
        &mut self,
        organisation: &Organisation,
    ) -> Result<(), RepositoryError>;

    /// Overwrites the mutable columns of an existing organisation in place.
    ///
    /// The created audit columns are kept from `organisation` as given, so callers decide
    /// whether they are carried over or replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - Number of rows updated (0 when the organisation does not exist)
    async fn update_organisation(
        &mut self,
        organisation: &Organisation,
    ) -> Result<u64, RepositoryError>;

    async fn insert_organisation_type(
        &mut self,
        organisation_type: &OrganisationType,
    ) -> Result<i64, RepositoryError>;

    async fn insert_organisation_phone(
        &mut self,
        phone: &OrganisationPhone,
    ) -> Result<i64, RepositoryError>;

    async fn insert_organisation_email(
        &mut self,
        email: &OrganisationEmail,
    ) -> Result<i64, RepositoryError>;

    async fn insert_organisation_web_address(
        &mut self,
        web_address: &OrganisationWebAddress,
    ) -> Result<i64, RepositoryError>;

    async fn insert_organisation_address(
        &mut self,
        address: &OrganisationAddress,
    ) -> Result<i64, RepositoryError>;

    async fn insert_organisation_address_phone(
        &mut self,
        address_phone: &OrganisationAddressPhone,
    ) -> Result<i64, RepositoryError>;

    async fn delete_organisation_address_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation_emails(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation_web_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation_types(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    /// Deletes every contact employment that points at the organisation.
    async fn delete_employments_for_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError>;

    async fn delete_organisation(&mut self, organisation_id: i64) -> Result<u64, RepositoryError>;

    // ---------------------------------------------------------------------
    // Generic lookups
    // ---------------------------------------------------------------------

    /// Checks whether a row of the given element type exists under `id`.
    async fn exists(&mut self, element_type: ElementType, id: i64)
    -> Result<bool, RepositoryError>;

    /// Counts every row of the given element type.
    async fn count(&mut self, element_type: ElementType) -> Result<i64, RepositoryError>;

    /// Makes every change of the transaction durable.
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;
}
