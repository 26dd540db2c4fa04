// HTTP request handlers
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use contacts_shared::types::{
    Contact, MigrateContactRequest, MigrateContactResponse, MigrateOrganisationRequest,
    MigrateOrganisationResponse, Organisation,
};

use super::state::AppState;
use crate::errors::ApiError;

/// Migrates one contact with its whole sub-graph.
pub async fn migrate_contact(
    State(state): State<AppState>,
    payload: Result<Json<MigrateContactRequest>, JsonRejection>,
) -> Result<Json<MigrateContactResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.contacts.migrate_contact(&request).await?;
    Ok(Json(response))
}

/// Migrates one organisation with its child records.
pub async fn migrate_organisation(
    State(state): State<AppState>,
    payload: Result<Json<MigrateOrganisationRequest>, JsonRejection>,
) -> Result<Json<MigrateOrganisationResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.organisations.migrate_organisation(&request).await?;
    Ok(Json(response))
}

pub async fn get_contact(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(contact_id) = path?;
    Ok(Json(state.sync.get_contact(contact_id).await?))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(contact_id) = path?;
    state.sync.delete_contact(contact_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_organisation(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Organisation>, ApiError> {
    let Path(organisation_id) = path?;
    Ok(Json(state.sync.get_organisation(organisation_id).await?))
}

pub async fn delete_organisation(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(organisation_id) = path?;
    state.sync.delete_organisation(organisation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
