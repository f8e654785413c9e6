use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::messages;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// A translatable message: a stable key plus the values it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Message {
    #[schema(example = "referenceData.error.geographicZone.notFound")]
    pub key: String,
    pub params: Vec<String>,
}

impl Message {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} ({})", self.key, self.params.join(", "))
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "error": "Not Found",
    "message": "Not found: referenceData.error.facility.notFound (550e8400-e29b-41d4-a716-446655440000)",
    "messageKey": "referenceData.error.facility.notFound",
    "params": ["550e8400-e29b-41d4-a716-446655440000"],
    "requestId": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Message key clients translate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Values referenced by the message key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// ISO 8601 timestamp when error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(Message),

    #[error("Validation error: {0}")]
    ValidationError(Message),

    #[error("Conflict: {0}")]
    Conflict(Message),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(
            Message::new(messages::ERROR_VALIDATION_FAILED).with_param(err),
        )
    }
}

impl ServiceError {
    pub fn not_found(key: &str, param: impl ToString) -> Self {
        ServiceError::NotFound(Message::new(key).with_param(param))
    }

    pub fn validation(key: &str, param: impl ToString) -> Self {
        ServiceError::ValidationError(Message::new(key).with_param(param))
    }

    pub fn conflict(key: &str, param: impl ToString) -> Self {
        ServiceError::Conflict(Message::new(key).with_param(param))
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The structured message, when the error carries one.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::NotFound(msg) | Self::ValidationError(msg) | Self::Conflict(msg) => Some(msg),
            _ => None,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let (message_key, params) = match self.message() {
            Some(msg) => (Some(msg.key.clone()), msg.params.clone()),
            None => (None, Vec::new()),
        };

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            message_key,
            params,
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ServiceError::not_found(messages::ERROR_FACILITY_NOT_FOUND, "x"), StatusCode::NOT_FOUND)]
    #[case(ServiceError::validation(messages::ERROR_INVALID_UUID, "x"), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::conflict(messages::ERROR_PROGRAM_CODE_DUPLICATED, "x"), StatusCode::CONFLICT)]
    #[case(ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::DatabaseError(DbErr::Custom("x".into())), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status_codes(#[case] error: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn message_display_includes_params() {
        let msg = Message::new(messages::ERROR_GEOGRAPHIC_LEVEL_NOT_FOUND).with_param(3);
        assert_eq!(
            msg.to_string(),
            "referenceData.error.geographicLevel.notFound (3)"
        );
        assert_eq!(
            Message::new(messages::ERROR_VALIDATION_FAILED).to_string(),
            messages::ERROR_VALIDATION_FAILED
        );
    }

    #[test]
    fn database_errors_hide_details() {
        let err = ServiceError::DatabaseError(DbErr::Custom("password=secret".into()));
        assert_eq!(err.response_message(), "Database error");
        assert!(err.message().is_none());
    }
}
