use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use contacts_shared::types::{
    Contact, ContactAddress, ContactAddressPhone, ContactEmail, ContactEmployment,
    ContactIdentity, ContactPhone, ContactRestriction, ElementType, GENERATED_ID_START,
    Organisation, OrganisationAddress, OrganisationAddressPhone, OrganisationEmail,
    OrganisationPhone, OrganisationType, OrganisationWebAddress, PrisonerContact,
    PrisonerContactRestriction,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::errors::RepositoryError;
use crate::interfaces::{EntityStore, StoreTransaction};

/// One table: rows by key plus the next generated key.
#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: GENERATED_ID_START,
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, row: T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.insert(id, row);
        id
    }

    fn insert_with_id(&mut self, table: &str, id: i64, row: T) -> Result<(), RepositoryError> {
        if self.rows.contains_key(&id) {
            return Err(RepositoryError::UniqueViolation(format!(
                "duplicate key {id} in {table}"
            )));
        }
        self.rows.insert(id, row);
        Ok(())
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(predicate)
    }

    fn keys_where(&self, predicate: impl Fn(&T) -> bool) -> BTreeSet<i64> {
        self.rows
            .iter()
            .filter(|(_, row)| predicate(row))
            .map(|(id, _)| *id)
            .collect()
    }

    fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> u64 {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        (before - self.rows.len()) as u64
    }

    fn len(&self) -> i64 {
        self.rows.len() as i64
    }
}

fn missing_parent(table: &str, parent: &str, id: i64) -> RepositoryError {
    RepositoryError::ForeignKeyViolation(format!(
        "insert into {table} references missing {parent} {id}"
    ))
}

fn still_referenced(table: &str, by: &str) -> RepositoryError {
    RepositoryError::ForeignKeyViolation(format!("delete from {table} still referenced by {by}"))
}

#[derive(Debug, Clone, Default)]
struct Tables {
    contacts: Table<Contact>,
    contact_phones: Table<ContactPhone>,
    contact_addresses: Table<ContactAddress>,
    contact_address_phones: Table<ContactAddressPhone>,
    contact_emails: Table<ContactEmail>,
    contact_identities: Table<ContactIdentity>,
    contact_restrictions: Table<ContactRestriction>,
    employments: Table<ContactEmployment>,
    prisoner_contacts: Table<PrisonerContact>,
    prisoner_contact_restrictions: Table<PrisonerContactRestriction>,
    organisations: Table<Organisation>,
    organisation_types: Table<OrganisationType>,
    organisation_phones: Table<OrganisationPhone>,
    organisation_emails: Table<OrganisationEmail>,
    organisation_web_addresses: Table<OrganisationWebAddress>,
    organisation_addresses: Table<OrganisationAddress>,
    organisation_address_phones: Table<OrganisationAddressPhone>,
}

impl Tables {
    fn require_contact(&self, table: &str, contact_id: i64) -> Result<(), RepositoryError> {
        if self.contacts.contains(contact_id) {
            Ok(())
        } else {
            Err(missing_parent(table, "contact", contact_id))
        }
    }

    fn require_organisation(
        &self,
        table: &str,
        organisation_id: i64,
    ) -> Result<(), RepositoryError> {
        if self.organisations.contains(organisation_id) {
            Ok(())
        } else {
            Err(missing_parent(table, "organisation", organisation_id))
        }
    }

    fn contact_referencing_table(&self, contact_id: i64) -> Option<&'static str> {
        let checks: [(&'static str, bool); 8] = [
            ("contact_phone", self.contact_phones.any(|r| r.contact_id == contact_id)),
            ("contact_address", self.contact_addresses.any(|r| r.contact_id == contact_id)),
            (
                "contact_address_phone",
                self.contact_address_phones.any(|r| r.contact_id == contact_id),
            ),
            ("contact_email", self.contact_emails.any(|r| r.contact_id == contact_id)),
            ("contact_identity", self.contact_identities.any(|r| r.contact_id == contact_id)),
            (
                "contact_restriction",
                self.contact_restrictions.any(|r| r.contact_id == contact_id),
            ),
            ("employment", self.employments.any(|r| r.contact_id == contact_id)),
            ("prisoner_contact", self.prisoner_contacts.any(|r| r.contact_id == contact_id)),
        ];
        checks.into_iter().find(|(_, hit)| *hit).map(|(name, _)| name)
    }

    fn organisation_referencing_table(&self, organisation_id: i64) -> Option<&'static str> {
        let checks: [(&'static str, bool); 7] = [
            (
                "organisation_type",
                self.organisation_types.any(|r| r.organisation_id == organisation_id),
            ),
            (
                "organisation_phone",
                self.organisation_phones.any(|r| r.organisation_id == organisation_id),
            ),
            (
                "organisation_email",
                self.organisation_emails.any(|r| r.organisation_id == organisation_id),
            ),
            (
                "organisation_web_address",
                self.organisation_web_addresses
                    .any(|r| r.organisation_id == organisation_id),
            ),
            (
                "organisation_address",
                self.organisation_addresses.any(|r| r.organisation_id == organisation_id),
            ),
            (
                "organisation_address_phone",
                self.organisation_address_phones
                    .any(|r| r.organisation_id == organisation_id),
            ),
            ("employment", self.employments.any(|r| r.organisation_id == organisation_id)),
        ];
        checks.into_iter().find(|(_, hit)| *hit).map(|(name, _)| name)
    }
}

/// Entity store kept entirely in process memory.
///
/// Cloning the store shares the same tables. Transactions are serialised: `begin` waits
/// until the previous transaction has been committed or dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEntityStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>, RepositoryError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryStoreTransaction { guard, working }))
    }
}

/// Transaction over an [`InMemoryEntityStore`].
///
/// Changes are made to `working` and copied back on commit. Dropping the transaction
/// releases the lock and leaves the shared tables untouched.
pub struct InMemoryStoreTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl StoreTransaction for InMemoryStoreTransaction {
    async fn find_contact(&mut self, contact_id: i64) -> Result<Option<Contact>, RepositoryError> {
        Ok(self.working.contacts.rows.get(&contact_id).cloned())
    }

    async fn insert_contact_with_id(&mut self, contact: &Contact) -> Result<(), RepositoryError> {
        self.working
            .contacts
            .insert_with_id("contact", contact.contact_id, contact.clone())
    }

    async fn insert_contact_phone(&mut self, phone: &ContactPhone) -> Result<i64, RepositoryError> {
        self.working.require_contact("contact_phone", phone.contact_id)?;
        Ok(self.working.contact_phones.insert(phone.clone()))
    }

    async fn insert_contact_address(
        &mut self,
        address: &ContactAddress,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_contact("contact_address", address.contact_id)?;
        Ok(self.working.contact_addresses.insert(address.clone()))
    }

    async fn insert_contact_address_phone(
        &mut self,
        address_phone: &ContactAddressPhone,
    ) -> Result<i64, RepositoryError> {
        let table = "contact_address_phone";
        self.working.require_contact(table, address_phone.contact_id)?;
        if !self
            .working
            .contact_addresses
            .contains(address_phone.contact_address_id)
        {
            return Err(missing_parent(
                table,
                "contact_address",
                address_phone.contact_address_id,
            ));
        }
        if !self
            .working
            .contact_phones
            .contains(address_phone.contact_phone_id)
        {
            return Err(missing_parent(
                table,
                "contact_phone",
                address_phone.contact_phone_id,
            ));
        }
        Ok(self.working.contact_address_phones.insert(address_phone.clone()))
    }

    async fn insert_contact_email(&mut self, email: &ContactEmail) -> Result<i64, RepositoryError> {
        self.working.require_contact("contact_email", email.contact_id)?;
        Ok(self.working.contact_emails.insert(email.clone()))
    }

    async fn insert_contact_identity(
        &mut self,
        identity: &ContactIdentity,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_contact("contact_identity", identity.contact_id)?;
        Ok(self.working.contact_identities.insert(identity.clone()))
    }

    async fn insert_contact_restriction(
        &mut self,
        restriction: &ContactRestriction,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_contact("contact_restriction", restriction.contact_id)?;
        Ok(self.working.contact_restrictions.insert(restriction.clone()))
    }

    async fn insert_contact_employment(
        &mut self,
        employment: &ContactEmployment,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_contact("employment", employment.contact_id)?;
        self.working
            .require_organisation("employment", employment.organisation_id)?;
        Ok(self.working.employments.insert(employment.clone()))
    }

    async fn insert_prisoner_contact(
        &mut self,
        prisoner_contact: &PrisonerContact,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_contact("prisoner_contact", prisoner_contact.contact_id)?;
        Ok(self.working.prisoner_contacts.insert(prisoner_contact.clone()))
    }

    async fn insert_prisoner_contact_restriction(
        &mut self,
        restriction: &PrisonerContactRestriction,
    ) -> Result<i64, RepositoryError> {
        if !self
            .working
            .prisoner_contacts
            .contains(restriction.prisoner_contact_id)
        {
            return Err(missing_parent(
                "prisoner_contact_restriction",
                "prisoner_contact",
                restriction.prisoner_contact_id,
            ));
        }
        Ok(self
            .working
            .prisoner_contact_restrictions
            .insert(restriction.clone()))
    }

    async fn find_prisoner_contact_ids(
        &mut self,
        contact_id: i64,
    ) -> Result<Vec<i64>, RepositoryError> {
        Ok(self
            .working
            .prisoner_contacts
            .keys_where(|r| r.contact_id == contact_id)
            .into_iter()
            .collect())
    }

    async fn delete_contact_address_phones(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .contact_address_phones
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_addresses(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        let doomed = self
            .working
            .contact_addresses
            .keys_where(|r| r.contact_id == contact_id);
        if self
            .working
            .contact_address_phones
            .any(|r| doomed.contains(&r.contact_address_id))
        {
            return Err(still_referenced("contact_address", "contact_address_phone"));
        }
        Ok(self
            .working
            .contact_addresses
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_phones(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        let doomed = self
            .working
            .contact_phones
            .keys_where(|r| r.contact_id == contact_id);
        if self
            .working
            .contact_address_phones
            .any(|r| doomed.contains(&r.contact_phone_id))
        {
            return Err(still_referenced("contact_phone", "contact_address_phone"));
        }
        Ok(self
            .working
            .contact_phones
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_emails(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .contact_emails
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_identities(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .contact_identities
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_restrictions(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .contact_restrictions
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact_employments(
        &mut self,
        contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .employments
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_prisoner_contact_restrictions(
        &mut self,
        prisoner_contact_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .prisoner_contact_restrictions
            .remove_where(|r| r.prisoner_contact_id == prisoner_contact_id))
    }

    async fn delete_prisoner_contacts(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        let doomed = self
            .working
            .prisoner_contacts
            .keys_where(|r| r.contact_id == contact_id);
        if self
            .working
            .prisoner_contact_restrictions
            .any(|r| doomed.contains(&r.prisoner_contact_id))
        {
            return Err(still_referenced(
                "prisoner_contact",
                "prisoner_contact_restriction",
            ));
        }
        Ok(self
            .working
            .prisoner_contacts
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn delete_contact(&mut self, contact_id: i64) -> Result<u64, RepositoryError> {
        if let Some(by) = self.working.contact_referencing_table(contact_id) {
            return Err(still_referenced("contact", by));
        }
        Ok(self
            .working
            .contacts
            .remove_where(|r| r.contact_id == contact_id))
    }

    async fn find_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<Option<Organisation>, RepositoryError> {
        Ok(self.working.organisations.rows.get(&organisation_id).cloned())
    }

    async fn insert_organisation_with_id(
        &mut self,
        organisation: &Organisation,
    ) -> Result<(), RepositoryError> {
        self.working.organisations.insert_with_id(
            "organisation",
            organisation.organisation_id,
            organisation.clone(),
        )
    }

    async fn update_organisation(
        &mut self,
        organisation: &Organisation,
    ) -> Result<u64, RepositoryError> {
        match self
            .working
            .organisations
            .rows
            .get_mut(&organisation.organisation_id)
        {
            Some(row) => {
                *row = organisation.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn insert_organisation_type(
        &mut self,
        organisation_type: &OrganisationType,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_organisation("organisation_type", organisation_type.organisation_id)?;
        if self.working.organisation_types.any(|r| {
            r.organisation_id == organisation_type.organisation_id
                && r.organisation_type == organisation_type.organisation_type
        }) {
            return Err(RepositoryError::UniqueViolation(format!(
                "organisation {} already has type {}",
                organisation_type.organisation_id, organisation_type.organisation_type
            )));
        }
        Ok(self
            .working
            .organisation_types
            .insert(organisation_type.clone()))
    }

    async fn insert_organisation_phone(
        &mut self,
        phone: &OrganisationPhone,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_organisation("organisation_phone", phone.organisation_id)?;
        Ok(self.working.organisation_phones.insert(phone.clone()))
    }

    async fn insert_organisation_email(
        &mut self,
        email: &OrganisationEmail,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_organisation("organisation_email", email.organisation_id)?;
        Ok(self.working.organisation_emails.insert(email.clone()))
    }

    async fn insert_organisation_web_address(
        &mut self,
        web_address: &OrganisationWebAddress,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_organisation("organisation_web_address", web_address.organisation_id)?;
        Ok(self
            .working
            .organisation_web_addresses
            .insert(web_address.clone()))
    }

    async fn insert_organisation_address(
        &mut self,
        address: &OrganisationAddress,
    ) -> Result<i64, RepositoryError> {
        self.working
            .require_organisation("organisation_address", address.organisation_id)?;
        Ok(self.working.organisation_addresses.insert(address.clone()))
    }

    async fn insert_organisation_address_phone(
        &mut self,
        address_phone: &OrganisationAddressPhone,
    ) -> Result<i64, RepositoryError> {
        let table = "organisation_address_phone";
        self.working
            .require_organisation(table, address_phone.organisation_id)?;
        if !self
            .working
            .organisation_addresses
            .contains(address_phone.organisation_address_id)
        {
            return Err(missing_parent(
                table,
                "organisation_address",
                address_phone.organisation_address_id,
            ));
        }
        if !self
            .working
            .organisation_phones
            .contains(address_phone.organisation_phone_id)
        {
            return Err(missing_parent(
                table,
                "organisation_phone",
                address_phone.organisation_phone_id,
            ));
        }
        Ok(self
            .working
            .organisation_address_phones
            .insert(address_phone.clone()))
    }

    async fn delete_organisation_address_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .organisation_address_phones
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        let doomed = self
            .working
            .organisation_addresses
            .keys_where(|r| r.organisation_id == organisation_id);
        if self
            .working
            .organisation_address_phones
            .any(|r| doomed.contains(&r.organisation_address_id))
        {
            return Err(still_referenced(
                "organisation_address",
                "organisation_address_phone",
            ));
        }
        Ok(self
            .working
            .organisation_addresses
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation_phones(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        let doomed = self
            .working
            .organisation_phones
            .keys_where(|r| r.organisation_id == organisation_id);
        if self
            .working
            .organisation_address_phones
            .any(|r| doomed.contains(&r.organisation_phone_id))
        {
            return Err(still_referenced(
                "organisation_phone",
                "organisation_address_phone",
            ));
        }
        Ok(self
            .working
            .organisation_phones
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation_emails(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .organisation_emails
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation_web_addresses(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .organisation_web_addresses
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation_types(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .organisation_types
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_employments_for_organisation(
        &mut self,
        organisation_id: i64,
    ) -> Result<u64, RepositoryError> {
        Ok(self
            .working
            .employments
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn delete_organisation(&mut self, organisation_id: i64) -> Result<u64, RepositoryError> {
        if let Some(by) = self.working.organisation_referencing_table(organisation_id) {
            return Err(still_referenced("organisation", by));
        }
        Ok(self
            .working
            .organisations
            .remove_where(|r| r.organisation_id == organisation_id))
    }

    async fn exists(
        &mut self,
        element_type: ElementType,
        id: i64,
    ) -> Result<bool, RepositoryError> {
        let t = &self.working;
        let found = match element_type {
            ElementType::Contact => t.contacts.contains(id),
            ElementType::Phone => t.contact_phones.contains(id),
            ElementType::Address => t.contact_addresses.contains(id),
            ElementType::AddressPhone => t.contact_address_phones.contains(id),
            ElementType::Email => t.contact_emails.contains(id),
            ElementType::Identity => t.contact_identities.contains(id),
            ElementType::Restriction => t.contact_restrictions.contains(id),
            ElementType::Employment => t.employments.contains(id),
            ElementType::PrisonerContact => t.prisoner_contacts.contains(id),
            ElementType::PrisonerContactRestriction => {
                t.prisoner_contact_restrictions.contains(id)
            }
            ElementType::Organisation => t.organisations.contains(id),
            ElementType::OrganisationType => t.organisation_types.contains(id),
            ElementType::OrganisationPhone => t.organisation_phones.contains(id),
            ElementType::OrganisationEmail => t.organisation_emails.contains(id),
            ElementType::OrganisationWeb => t.organisation_web_addresses.contains(id),
            ElementType::OrganisationAddress => t.organisation_addresses.contains(id),
            ElementType::OrganisationAddressPhone => t.organisation_address_phones.contains(id),
        };
        Ok(found)
    }

    async fn count(&mut self, element_type: ElementType) -> Result<i64, RepositoryError> {
        let t = &self.working;
        let count = match element_type {
            ElementType::Contact => t.contacts.len(),
            ElementType::Phone => t.contact_phones.len(),
            ElementType::Address => t.contact_addresses.len(),
            ElementType::AddressPhone => t.contact_address_phones.len(),
            ElementType::Email => t.contact_emails.len(),
            ElementType::Identity => t.contact_identities.len(),
            ElementType::Restriction => t.contact_restrictions.len(),
            ElementType::Employment => t.employments.len(),
            ElementType::PrisonerContact => t.prisoner_contacts.len(),
            ElementType::PrisonerContactRestriction => t.prisoner_contact_restrictions.len(),
            ElementType::Organisation => t.organisations.len(),
            ElementType::OrganisationType => t.organisation_types.len(),
            ElementType::OrganisationPhone => t.organisation_phones.len(),
            ElementType::OrganisationEmail => t.organisation_emails.len(),
            ElementType::OrganisationWeb => t.organisation_web_addresses.len(),
            ElementType::OrganisationAddress => t.organisation_addresses.len(),
            ElementType::OrganisationAddressPhone => t.organisation_address_phones.len(),
        };
        Ok(count)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let InMemoryStoreTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contacts_shared::types::Audit;

    fn audit() -> Audit {
        Audit {
            created_by: "MIGRATION".to_string(),
            created_time: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            updated_by: None,
            updated_time: None,
        }
    }

    fn contact(contact_id: i64) -> Contact {
        Contact {
            contact_id,
            title: None,
            last_name: "Smith".to_string(),
            first_name: "John".to_string(),
            middle_names: None,
            date_of_birth: None,
            deceased_flag: false,
            deceased_date: None,
            is_staff: false,
            remitter: false,
            gender: None,
            domestic_status: None,
            language_code: None,
            interpreter_required: false,
            audit: audit(),
        }
    }

    fn phone(contact_id: i64) -> ContactPhone {
        ContactPhone {
            contact_id,
            phone_type: "MOB".to_string(),
            phone_number: "07700 900000".to_string(),
            ext_number: None,
            audit: audit(),
        }
    }

    fn organisation(organisation_id: i64, name: &str) -> Organisation {
        Organisation {
            organisation_id,
            organisation_name: name.to_string(),
            programme_number: None,
            vat_number: None,
            caseload_id: None,
            comments: None,
            active: true,
            deactivated_date: None,
            audit: audit(),
        }
    }

    #[tokio::test]
    async fn test_commit_makes_changes_visible() {
        let store = InMemoryEntityStore::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_contact_with_id(&contact(1)).await.unwrap();
        let phone_id = tx.insert_contact_phone(&phone(1)).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(phone_id, GENERATED_ID_START);
        assert!(tx.exists(ElementType::Contact, 1).await.unwrap());
        assert!(tx.exists(ElementType::Phone, phone_id).await.unwrap());
        assert_eq!(tx.find_contact(1).await.unwrap().unwrap().last_name, "Smith");
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = InMemoryEntityStore::new();

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_contact_with_id(&contact(1)).await.unwrap();
            tx.insert_contact_phone(&phone(1)).await.unwrap();
        }

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.count(ElementType::Contact).await.unwrap(), 0);
        assert_eq!(tx.count(ElementType::Phone).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generated_ids_are_not_reused_after_delete() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_contact_with_id(&contact(1)).await.unwrap();

        let first = tx.insert_contact_phone(&phone(1)).await.unwrap();
        assert_eq!(tx.delete_contact_phones(1).await.unwrap(), 1);
        let second = tx.insert_contact_phone(&phone(1)).await.unwrap();

        assert!(second > first);
        assert!(!tx.exists(ElementType::Phone, first).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_root_key_is_unique_violation() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_contact_with_id(&contact(7)).await.unwrap();

        let err = tx.insert_contact_with_id(&contact(7)).await.unwrap_err();

        assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_child_without_parent_is_foreign_key_violation() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();

        let err = tx.insert_contact_phone(&phone(42)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

        tx.insert_contact_with_id(&contact(42)).await.unwrap();
        let employment = ContactEmployment {
            contact_id: 42,
            organisation_id: 999,
            active: true,
            audit: audit(),
        };
        let err = tx.insert_contact_employment(&employment).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_referenced_parent_cannot_be_deleted() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_contact_with_id(&contact(1)).await.unwrap();
        tx.insert_contact_phone(&phone(1)).await.unwrap();

        let err = tx.delete_contact(1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

        tx.delete_contact_phones(1).await.unwrap();
        assert_eq!(tx.delete_contact(1).await.unwrap(), 1);
        assert_eq!(tx.delete_contact(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_linked_address_phone_blocks_phone_delete() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_organisation_with_id(&organisation(5, "Acme"))
            .await
            .unwrap();
        let phone_id = tx
            .insert_organisation_phone(&OrganisationPhone {
                organisation_id: 5,
                phone_type: "BUS".to_string(),
                phone_number: "0114 496 0000".to_string(),
                ext_number: None,
                audit: audit(),
            })
            .await
            .unwrap();
        let address_id = tx
            .insert_organisation_address(&OrganisationAddress {
                organisation_id: 5,
                address_type: None,
                primary_address: true,
                flat: None,
                property: None,
                street: Some("Main Street".to_string()),
                area: None,
                city_code: None,
                county_code: None,
                post_code: None,
                country_code: None,
                mail_address: false,
                service_address: false,
                no_fixed_address: false,
                special_needs_code: None,
                contact_person_name: None,
                business_hours: None,
                comments: None,
                start_date: None,
                end_date: None,
                audit: audit(),
            })
            .await
            .unwrap();
        tx.insert_organisation_address_phone(&OrganisationAddressPhone {
            organisation_id: 5,
            organisation_address_id: address_id,
            organisation_phone_id: phone_id,
            audit: audit(),
        })
        .await
        .unwrap();

        let err = tx.delete_organisation_phones(5).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

        assert_eq!(tx.delete_organisation_address_phones(5).await.unwrap(), 1);
        assert_eq!(tx.delete_organisation_addresses(5).await.unwrap(), 1);
        assert_eq!(tx.delete_organisation_phones(5).await.unwrap(), 1);
        assert_eq!(tx.delete_organisation(5).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_organisation_overwrites_in_place() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_organisation_with_id(&organisation(999, "Old"))
            .await
            .unwrap();

        let updated = tx
            .update_organisation(&organisation(999, "New"))
            .await
            .unwrap();
        let missing = tx
            .update_organisation(&organisation(1000, "Nobody"))
            .await
            .unwrap();

        assert_eq!(updated, 1);
        assert_eq!(missing, 0);
        assert_eq!(
            tx.find_organisation(999)
                .await
                .unwrap()
                .unwrap()
                .organisation_name,
            "New"
        );
        assert_eq!(tx.count(ElementType::Organisation).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_organisation_type_is_unique_violation() {
        let store = InMemoryEntityStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.insert_organisation_with_id(&organisation(3, "Acme"))
            .await
            .unwrap();
        let org_type = OrganisationType {
            organisation_id: 3,
            organisation_type: "TEA".to_string(),
            audit: audit(),
        };

        tx.insert_organisation_type(&org_type).await.unwrap();
        let err = tx.insert_organisation_type(&org_type).await.unwrap_err();

        assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    }
}
