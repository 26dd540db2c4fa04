//! Builds the legacy-to-local identifier mapping returned by a migration.
//!
//! Pairs for nested records (address phones, relationship restrictions) are recorded
//! under the legacy id of their parent while rows are being created. They are joined
//! back onto the parent only when the response is assembled, so a child can never be
//! reported under the wrong parent whatever order the rows were created in.
use std::collections::HashMap;

use chrono::NaiveDate;
use contacts_shared::types::{
    AddressAndPhones, ContactsAndRestrictions, IdPair, MigrateContactResponse,
    MigrateOrganisationResponse, OrganisationAddressAndPhones,
};

/// Child pairs grouped by the legacy id of their parent.
#[derive(Debug, Default)]
pub struct NestedPairs {
    by_parent: HashMap<i64, Vec<IdPair>>,
}

impl NestedPairs {
    /// Files `pair` under the legacy id of its parent.
    ///
    /// # Arguments
    ///
    /// * `parent_nomis_id` - NOMIS id of the address or relationship owning the child
    /// * `pair` - The child's own legacy and local ids
    pub fn record(&mut self, parent_nomis_id: i64, pair: IdPair) {
        self.by_parent.entry(parent_nomis_id).or_default().push(pair);
    }

    /// Removes and returns the children of one parent, in recording order.
    pub fn take(&mut self, parent_nomis_id: i64) -> Vec<IdPair> {
        self.by_parent.remove(&parent_nomis_id).unwrap_or_default()
    }

    /// Attaches to each parent the children recorded under its legacy id.
    pub fn join<T>(
        mut self,
        parents: Vec<IdPair>,
        build: impl Fn(IdPair, Vec<IdPair>) -> T,
    ) -> Vec<T> {
        parents
            .into_iter()
            .map(|parent| {
                let children = self.take(parent.nomis_id);
                build(parent, children)
            })
            .collect()
    }
}

/// Pairs collected while a contact graph is created.
#[derive(Debug)]
pub struct ContactCorrelation {
    pub contact: IdPair,
    pub phones: Vec<IdPair>,
    pub addresses: Vec<IdPair>,
    pub address_phones: NestedPairs,
    pub emails: Vec<IdPair>,
    pub identities: Vec<IdPair>,
    pub restrictions: Vec<IdPair>,
    pub employments: Vec<IdPair>,
    pub relationships: Vec<IdPair>,
    pub relationship_restrictions: NestedPairs,
}

impl ContactCorrelation {
    pub fn new(contact: IdPair) -> Self {
        Self {
            contact,
            phones: Vec::new(),
            addresses: Vec::new(),
            address_phones: NestedPairs::default(),
            emails: Vec::new(),
            identities: Vec::new(),
            restrictions: Vec::new(),
            employments: Vec::new(),
            relationships: Vec::new(),
            relationship_restrictions: NestedPairs::default(),
        }
    }

    /// Builds the response tree, grouping address phones and relationship
    /// restrictions under their parents.
    pub fn into_response(
        self,
        last_name: String,
        date_of_birth: Option<NaiveDate>,
    ) -> MigrateContactResponse {
        let addresses = self
            .address_phones
            .join(self.addresses, |address, phones| AddressAndPhones {
                address,
                phones,
            });
        let relationships = self.relationship_restrictions.join(
            self.relationships,
            |relationship, restrictions| ContactsAndRestrictions {
                relationship,
                restrictions,
            },
        );

        MigrateContactResponse {
            contact: self.contact,
            last_name,
            date_of_birth,
            phone_numbers: self.phones,
            addresses,
            emails: self.emails,
            identities: self.identities,
            restrictions: self.restrictions,
            employments: self.employments,
            relationships,
        }
    }
}

/// Pairs collected while an organisation graph is created.
#[derive(Debug)]
pub struct OrganisationCorrelation {
    pub organisation: IdPair,
    pub types: Vec<IdPair>,
    pub phones: Vec<IdPair>,
    pub emails: Vec<IdPair>,
    pub web_addresses: Vec<IdPair>,
    pub addresses: Vec<IdPair>,
    pub address_phones: NestedPairs,
}

impl OrganisationCorrelation {
    pub fn new(organisation: IdPair) -> Self {
        Self {
            organisation,
            types: Vec::new(),
            phones: Vec::new(),
            emails: Vec::new(),
            web_addresses: Vec::new(),
            addresses: Vec::new(),
            address_phones: NestedPairs::default(),
        }
    }

    /// Builds the response tree with the address phones grouped per address.
    pub fn into_response(self) -> MigrateOrganisationResponse {
        let addresses = self.address_phones.join(self.addresses, |address, phone_numbers| {
            OrganisationAddressAndPhones {
                address,
                phone_numbers,
            }
        });

        MigrateOrganisationResponse {
            organisation: self.organisation,
            organisation_types: self.types,
            phone_numbers: self.phones,
            email_addresses: self.emails,
            web_addresses: self.web_addresses,
            addresses,
        }
    }
}
