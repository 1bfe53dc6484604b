//! Error types for the HTTP layer
//!
//! Pipeline errors are mapped onto status codes here:
//! bad payloads and links → 400, unknown papers → 404,
//! upstream failures → 502, programming errors → 500.

use crate::notion::MapError;
use crate::types::CatalogError;
use crate::workflow::SyncError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream service failed (502)
    #[error("Upstream error: {0}")]
    BadGateway(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        let message = err.to_string();
        match err {
            SyncError::Mapping(MapError::MissingRecordId)
            | SyncError::Mapping(MapError::UnsupportedOperation(_)) => ApiError::Internal(message),
            SyncError::Mapping(_) | SyncError::InvalidIdentifierUrl(_) => {
                ApiError::BadRequest(message)
            }
            SyncError::Catalog {
                source: CatalogError::NotFound(_),
                ..
            } => ApiError::NotFound(message),
            SyncError::Catalog { .. } | SyncError::Store(_) => ApiError::BadGateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, message) = match self {
            ApiError::NotFound(msg) => ("NOT_FOUND", msg),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg),
            ApiError::BadGateway(msg) => ("BAD_GATEWAY", msg),
            ApiError::Internal(msg) => ("INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
