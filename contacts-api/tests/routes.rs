use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use contacts_api::errors::ErrorResponse;
use contacts_api::server::{create_app, state::AppState};
use contacts_migration::{DomainEventPublisher, OutboundEvent, OutboundEventType, PublishError};
use contacts_repository::InMemoryEntityStore;
use contacts_shared::types::{
    Contact, ElementType, MigrateContactResponse, MigrateOrganisationResponse,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<OutboundEvent>>,
}

#[async_trait]
impl DomainEventPublisher for RecordingPublisher {
    async fn publish(&self, event: &OutboundEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

fn app() -> (Router, Arc<RecordingPublisher>) {
    let publisher = Arc::new(RecordingPublisher::default());
    let state = AppState::new(Arc::new(InMemoryEntityStore::new()), publisher.clone());
    (create_app(state), publisher)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

fn organisation(id: i64) -> Value {
    json!({"nomisCorporateId": id, "organisationName": "Acme", "active": true})
}

fn contact(person_id: i64, employer_id: i64) -> Value {
    json!({
        "personId": person_id,
        "lastName": "Smith",
        "firstName": "John",
        "dateOfBirth": "2001-01-01",
        "addresses": [{
            "addressId": 201,
            "phoneNumbers": [
                {"phoneId": 101, "number": "0114 1", "type": {"code": "MOB", "description": "Mobile"}}
            ]
        }],
        "employments": [
            {"sequence": 1, "corporate": {"id": employer_id, "name": "Acme"}, "active": true}
        ]
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_migrate_contact_returns_identifier_mapping() {
    let (app, _) = app();
    let (status, _) = send(&app, Method::POST, "/migrate/organisation", Some(organisation(500))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/migrate/contact", Some(contact(1, 500))).await;

    assert_eq!(status, StatusCode::OK);
    let response: MigrateContactResponse = parse(&body);
    assert_eq!(response.contact.dps_id, 1);
    assert_eq!(response.addresses[0].address.nomis_id, 201);
    assert_eq!(response.addresses[0].phones[0].nomis_id, 101);
    assert_eq!(response.addresses[0].phones[0].element_type, ElementType::AddressPhone);
    assert_eq!(response.employments.len(), 1);

    let raw: Value = parse(&body);
    assert_eq!(raw["contact"]["elementType"], "CONTACT");
    assert_eq!(raw["lastName"], "Smith");
}

#[tokio::test]
async fn test_migrate_organisation_keys_on_corporate_id() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/migrate/organisation", Some(organisation(42))).await;

    assert_eq!(status, StatusCode::OK);
    let response: MigrateOrganisationResponse = parse(&body);
    assert_eq!(response.organisation.nomis_id, 42);
    assert_eq!(response.organisation.dps_id, 42);
}

#[tokio::test]
async fn test_incomplete_body_is_a_bad_request() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/migrate/contact",
        Some(json!({"lastName": "Smith", "firstName": "John"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.status, 400);
    assert!(error.developer_message.contains("personId"));
}

#[tokio::test]
async fn test_validation_failures_are_listed() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/migrate/contact",
        Some(json!({"personId": 1, "lastName": " ", "firstName": "John"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(
        error.developer_message,
        "Validation failure(s): lastName must not be blank"
    );
}

#[tokio::test]
async fn test_missing_employer_is_not_found() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/migrate/contact", Some(contact(1, 404))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.status, 404);

    let (status, _) = send(&app, Method::GET, "/sync/contact/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sync_get_then_delete_contact() {
    let (app, publisher) = app();
    send(&app, Method::POST, "/migrate/organisation", Some(organisation(500))).await;
    send(&app, Method::POST, "/migrate/contact", Some(contact(7, 500))).await;

    let (status, body) = send(&app, Method::GET, "/sync/contact/7", None).await;
    assert_eq!(status, StatusCode::OK);
    let stored: Contact = parse(&body);
    assert_eq!(stored.contact_id, 7);
    assert_eq!(stored.last_name, "Smith");

    let (status, body) = send(&app, Method::DELETE, "/sync/contact/7", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::GET, "/sync/contact/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let events = publisher.events.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, OutboundEventType::ContactDeleted);
}

#[tokio::test]
async fn test_sync_delete_organisation() {
    let (app, publisher) = app();
    send(&app, Method::POST, "/migrate/organisation", Some(organisation(500))).await;

    let (status, _) = send(&app, Method::DELETE, "/sync/organisation/500", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/sync/organisation/500", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let events = publisher.events.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, OutboundEventType::OrganisationDeleted);
}

#[tokio::test]
async fn test_non_numeric_id_is_a_bad_request() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/sync/organisation/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.status, 400);
}

#[tokio::test]
async fn test_overlong_username_is_a_bad_request() {
    let (app, _) = app();
    let mut body = organisation(42);
    body["modifyUsername"] = json!("u".repeat(101));

    let (status, body) = send(&app, Method::POST, "/migrate/organisation", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(
        error.developer_message,
        "Validation failure(s): modifyUsername must be at most 100 characters"
    );

    let (status, _) = send(&app, Method::GET, "/sync/organisation/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
