mod common;

use std::sync::Arc;

use common::{ALL_ELEMENT_TYPES, FailingPublisher, Harness, full_contact, minimal_organisation};
use contacts_migration::{
    ContactMigrationService, MigrationError, OutboundEventType, OutboundEventsService, Source,
    SyncService,
};
use contacts_repository::{EntityStore, InMemoryEntityStore};
use contacts_shared::types::ElementType;

#[tokio::test]
async fn test_get_missing_records_is_not_found() {
    let harness = Harness::new();

    assert!(matches!(
        harness.sync.get_contact(1).await,
        Err(MigrationError::NotFound(_))
    ));
    assert!(matches!(
        harness.sync.get_organisation(1).await,
        Err(MigrationError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_contact_removes_graph_and_publishes_once() {
    let harness = Harness::new();
    harness
        .organisations
        .migrate_organisation(&minimal_organisation(500, "Acme"))
        .await
        .unwrap();
    harness
        .contacts
        .migrate_contact(&full_contact(10, 500))
        .await
        .unwrap();

    harness.sync.delete_contact(10).await.unwrap();

    for element_type in ALL_ELEMENT_TYPES {
        let expected = if element_type == ElementType::Organisation { 1 } else { 0 };
        assert_eq!(
            harness.count(element_type).await,
            expected,
            "{element_type:?}"
        );
    }

    let events = harness.publisher.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, OutboundEventType::ContactDeleted);
    assert_eq!(events[0].identifier, 10);
    assert_eq!(events[0].source, Source::Nomis);
}

#[tokio::test]
async fn test_delete_missing_contact_publishes_nothing() {
    let harness = Harness::new();

    let err = harness.sync.delete_contact(77).await.unwrap_err();

    assert!(matches!(err, MigrationError::NotFound(_)));
    assert!(harness.publisher.recorded().is_empty());
}

#[tokio::test]
async fn test_delete_organisation_drops_employments_first() {
    let harness = Harness::new();
    harness
        .organisations
        .migrate_organisation(&minimal_organisation(500, "Acme"))
        .await
        .unwrap();
    harness
        .contacts
        .migrate_contact(&full_contact(10, 500))
        .await
        .unwrap();

    harness.sync.delete_organisation(500).await.unwrap();

    assert_eq!(harness.count(ElementType::Organisation).await, 0);
    assert_eq!(harness.count(ElementType::Employment).await, 0);
    assert_eq!(harness.count(ElementType::Contact).await, 1);

    let events = harness.publisher.recorded();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, OutboundEventType::OrganisationDeleted);
    assert_eq!(events[0].identifier, 500);
}

#[tokio::test]
async fn test_publish_failure_does_not_undo_the_delete() {
    let store = InMemoryEntityStore::new();
    let shared: Arc<dyn EntityStore> = Arc::new(store.clone());
    let contacts = ContactMigrationService::new(shared.clone());
    let sync = SyncService::new(shared, OutboundEventsService::new(Arc::new(FailingPublisher)));
    let request = common::contact_request(serde_json::json!({
        "personId": 3,
        "lastName": "Smith",
        "firstName": "John"
    }));
    contacts.migrate_contact(&request).await.unwrap();

    sync.delete_contact(3).await.unwrap();

    let mut tx = store.begin().await.unwrap();
    assert!(!tx.exists(ElementType::Contact, 3).await.unwrap());
}
