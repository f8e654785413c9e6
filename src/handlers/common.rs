use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::common::{parse_uuid, PageRequest};
use crate::config::AppConfig;
use crate::errors::{Message, ServiceError};
use crate::messages;

/// Result type returned by every resource handler
pub type HandlerResult = Result<Response, ServiceError>;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Parses a path identifier, answering 400 with the standard error body when malformed.
pub fn path_id(raw: &str) -> Result<Uuid, ServiceError> {
    parse_uuid(raw)
}

/// Parses a boolean query parameter taken from a raw query string.
pub(crate) fn parse_flag(key: &str, value: &str) -> Result<bool, ServiceError> {
    value
        .parse()
        .map_err(|_| ServiceError::validation(messages::ERROR_SEARCH_PARAMS_INVALID, key))
}

pub(crate) fn parse_number(key: &str, value: &str) -> Result<u64, ServiceError> {
    value
        .parse()
        .map_err(|_| ServiceError::validation(messages::ERROR_SEARCH_PARAMS_INVALID, key))
}

/// Pagination parameters for list operations
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 0-based page number
    pub page: Option<u64>,
    /// Page size, capped by the server
    pub size: Option<u64>,
}

impl PageParams {
    /// Applies the configured size bounds. A page whose row offset does not fit
    /// a signed 64-bit SQL offset is rejected.
    pub fn to_request(self, config: &AppConfig) -> Result<PageRequest, ServiceError> {
        let max = u64::from(config.api_max_page_size);
        let size = self
            .size
            .unwrap_or_else(|| u64::from(config.api_default_page_size))
            .clamp(1, max.max(1));
        let page = self.page.unwrap_or(0);
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => Ok(PageRequest::new(page, size)),
            _ => Err(ServiceError::validation(
                messages::ERROR_SEARCH_PARAMS_INVALID,
                "page",
            )),
        }
    }
}

/// JSON body extractor that rejects malformed or unexpected payloads with
/// a 400 validation error instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ServiceError::ValidationError(
                Message::new(messages::ERROR_VALIDATION_FAILED).with_param(rejection.body_text()),
            )),
        }
    }
}

/// Query string extractor with the same 400 error body as [`ApiJson`].
#[derive(Debug, Clone, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ServiceError::ValidationError(
                Message::new(messages::ERROR_SEARCH_PARAMS_INVALID).with_param(rejection.body_text()),
            )),
        }
    }
}
