#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contacts_migration::{
    ContactMigrationService, DomainEventPublisher, OrganisationMigrationService, OutboundEvent,
    OutboundEventsService, PublishError, SyncService,
};
use contacts_repository::{EntityStore, InMemoryEntityStore};
use contacts_shared::types::{ElementType, MigrateContactRequest, MigrateOrganisationRequest};

/// Publisher that remembers every event it was given.
#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<OutboundEvent>>,
}

impl RecordingPublisher {
    pub fn recorded(&self) -> Vec<OutboundEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainEventPublisher for RecordingPublisher {
    async fn publish(&self, event: &OutboundEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Publisher whose bus is always down.
pub struct FailingPublisher;

#[async_trait]
impl DomainEventPublisher for FailingPublisher {
    async fn publish(&self, _event: &OutboundEvent) -> Result<(), PublishError> {
        Err(PublishError::Delivery("bus unavailable".to_string()))
    }
}

pub struct Harness {
    pub store: InMemoryEntityStore,
    pub publisher: Arc<RecordingPublisher>,
    pub contacts: ContactMigrationService,
    pub organisations: OrganisationMigrationService,
    pub sync: SyncService,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryEntityStore::new();
        let shared: Arc<dyn EntityStore> = Arc::new(store.clone());
        let publisher = Arc::new(RecordingPublisher::default());
        let events = OutboundEventsService::new(publisher.clone());

        Self {
            contacts: ContactMigrationService::new(shared.clone()),
            organisations: OrganisationMigrationService::new(shared.clone()),
            sync: SyncService::new(shared, events),
            store,
            publisher,
        }
    }

    pub async fn count(&self, element_type: ElementType) -> i64 {
        let mut tx = self.store.begin().await.unwrap();
        tx.count(element_type).await.unwrap()
    }

    pub async fn exists(&self, element_type: ElementType, id: i64) -> bool {
        let mut tx = self.store.begin().await.unwrap();
        tx.exists(element_type, id).await.unwrap()
    }

    /// Row counts of every table, in `ElementType` order.
    pub async fn snapshot(&self) -> Vec<i64> {
        let mut counts = Vec::new();
        for element_type in ALL_ELEMENT_TYPES {
            counts.push(self.count(element_type).await);
        }
        counts
    }
}

pub const ALL_ELEMENT_TYPES: [ElementType; 17] = [
    ElementType::Contact,
    ElementType::Phone,
    ElementType::Address,
    ElementType::AddressPhone,
    ElementType::Email,
    ElementType::Identity,
    ElementType::Restriction,
    ElementType::Employment,
    ElementType::PrisonerContact,
    ElementType::PrisonerContactRestriction,
    ElementType::Organisation,
    ElementType::OrganisationType,
    ElementType::OrganisationPhone,
    ElementType::OrganisationEmail,
    ElementType::OrganisationWeb,
    ElementType::OrganisationAddress,
    ElementType::OrganisationAddressPhone,
];

pub fn contact_request(value: serde_json::Value) -> MigrateContactRequest {
    serde_json::from_value(value).unwrap()
}

pub fn organisation_request(value: serde_json::Value) -> MigrateOrganisationRequest {
    serde_json::from_value(value).unwrap()
}

pub fn minimal_organisation(id: i64, name: &str) -> MigrateOrganisationRequest {
    organisation_request(serde_json::json!({
        "nomisCorporateId": id,
        "organisationName": name,
        "active": true
    }))
}

/// A contact carrying one of every kind of sub-record.
pub fn full_contact(person_id: i64, employer_id: i64) -> MigrateContactRequest {
    contact_request(serde_json::json!({
        "personId": person_id,
        "lastName": "Smith",
        "firstName": "John",
        "dateOfBirth": "2001-01-01",
        "title": {"code": "MR", "description": "Mr"},
        "phoneNumbers": [
            {"phoneId": 11, "number": "0114 100", "type": {"code": "HOME", "description": "Home"}}
        ],
        "addresses": [
            {
                "addressId": 201,
                "street": "Main Street",
                "phoneNumbers": [
                    {"phoneId": 101, "number": "0114 101", "type": {"code": "MOB", "description": "Mobile"}},
                    {"phoneId": 102, "number": "0114 102", "type": {"code": "HOME", "description": "Home"}}
                ]
            },
            {
                "addressId": 202,
                "street": "High Street",
                "phoneNumbers": [
                    {"phoneId": 103, "number": "0114 103", "type": {"code": "BUS", "description": "Business"}}
                ]
            }
        ],
        "emailAddresses": [{"emailAddressId": 31, "email": "john@example.com"}],
        "identifiers": [
            {"sequence": 1, "type": {"code": "DL", "description": "Driving licence"}, "identifier": "SMITH123"}
        ],
        "restrictions": [
            {"id": 41, "type": {"code": "BAN", "description": "Banned"}, "effectiveDate": "2024-01-01"}
        ],
        "employments": [
            {"sequence": 1, "corporate": {"id": employer_id, "name": "Acme"}, "active": true}
        ],
        "contacts": [
            {
                "id": 51,
                "contactType": {"code": "S", "description": "Social"},
                "relationshipType": {"code": "BRO", "description": "Brother"},
                "prisonerNumber": "A1234BC",
                "restrictions": [
                    {"id": 61, "restrictionType": {"code": "CCTV", "description": "CCTV"}},
                    {"id": 62, "restrictionType": {"code": "BAN", "description": "Banned"}}
                ]
            },
            {
                "id": 52,
                "contactType": {"code": "O", "description": "Official"},
                "relationshipType": {"code": "POL", "description": "Police"},
                "prisonerNumber": "B9876ZZ"
            }
        ]
    }))
}
