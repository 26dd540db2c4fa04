use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contacts_migration::MigrationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a single API request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// Body or path could not be read into the expected shape.
    #[error("Malformed request: {0}")]
    BadRequest(String),
}

/// Body sent back with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: u16,
    pub user_message: String,
    pub developer_message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Migration(MigrationError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Migration(MigrationError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Migration(MigrationError::Repository(e)) if e.is_constraint_violation() => {
                StatusCode::CONFLICT
            }
            ApiError::Migration(MigrationError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn user_message(&self, status: StatusCode) -> String {
        let prefix = match status {
            StatusCode::BAD_REQUEST => "Validation failure",
            StatusCode::NOT_FOUND => "Entity not found",
            StatusCode::CONFLICT => "Conflicting data",
            _ => "Unexpected error",
        };
        format!("{prefix}: {self}")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            user_message: self.user_message(status),
            developer_message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
