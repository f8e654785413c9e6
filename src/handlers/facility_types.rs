use axum::extract::{Path, RawQuery, State};
use utoipa::IntoParams;

use super::common::{
    created_response, no_content_response, parse_flag, parse_number, path_id, success_response,
    ApiJson, HandlerResult, PageParams,
};
use super::AppState;
use crate::common::{parse_uuid, Page};
use crate::dto::FacilityTypeDto;
use crate::errors::ServiceError;
use crate::messages;
use crate::services::facility_types::FacilityTypeFilter;

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
struct FacilityTypeQueryDoc {
    /// Facility type id, may be repeated
    id: Option<Vec<uuid::Uuid>>,
    active: Option<bool>,
    page: Option<u64>,
    size: Option<u64>,
}

/// Splits a raw query string into the type filter and paging.
pub fn parse_facility_type_query(
    raw: Option<&str>,
) -> Result<(FacilityTypeFilter, PageParams), ServiceError> {
    let mut filter = FacilityTypeFilter::default();
    let mut page = PageParams::default();

    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "id" => {
                filter.ids.insert(parse_uuid(&value)?);
            }
            "active" => filter.active = Some(parse_flag(&key, &value)?),
            "page" => page.page = Some(parse_number(&key, &value)?),
            "size" => page.size = Some(parse_number(&key, &value)?),
            other => {
                return Err(ServiceError::validation(
                    messages::ERROR_SEARCH_PARAMS_INVALID,
                    other,
                ))
            }
        }
    }
    Ok((filter, page))
}

#[utoipa::path(
    get,
    path = "/api/facilityTypes",
    params(FacilityTypeQueryDoc),
    responses(
        (status = 200, description = "Page of facility types", body = Page<FacilityTypeDto>),
        (status = 400, description = "Malformed parameter", body = crate::errors::ErrorResponse),
    ),
    tag = "facilityTypes"
)]
pub async fn list_facility_types(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> HandlerResult {
    let (filter, page) = parse_facility_type_query(raw.as_deref())?;
    let types = state
        .services
        .facility_types
        .list_facility_types(filter, page.to_request(&state.config)?)
        .await?;
    Ok(success_response(types.map(|t| FacilityTypeDto::from(&t))))
}

#[utoipa::path(
    get,
    path = "/api/facilityTypes/{id}",
    params(("id" = Uuid, Path, description = "Facility type id")),
    responses(
        (status = 200, description = "Facility type", body = FacilityTypeDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "facilityTypes"
)]
pub async fn get_facility_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let facility_type = state
        .services
        .facility_types
        .get_facility_type(path_id(&id)?)
        .await?;
    Ok(success_response(FacilityTypeDto::from(&facility_type)))
}

#[utoipa::path(
    post,
    path = "/api/facilityTypes",
    request_body = FacilityTypeDto,
    responses(
        (status = 201, description = "Facility type created", body = FacilityTypeDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "facilityTypes"
)]
pub async fn create_facility_type(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<FacilityTypeDto>,
) -> HandlerResult {
    let facility_type = state.services.facility_types.create_facility_type(dto).await?;
    Ok(created_response(FacilityTypeDto::from(&facility_type)))
}

#[utoipa::path(
    put,
    path = "/api/facilityTypes/{id}",
    params(("id" = Uuid, Path, description = "Facility type id")),
    request_body = FacilityTypeDto,
    responses(
        (status = 200, description = "Facility type saved", body = FacilityTypeDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "facilityTypes"
)]
pub async fn save_facility_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<FacilityTypeDto>,
) -> HandlerResult {
    let facility_type = state
        .services
        .facility_types
        .save_facility_type(path_id(&id)?, dto)
        .await?;
    Ok(success_response(FacilityTypeDto::from(&facility_type)))
}

#[utoipa::path(
    delete,
    path = "/api/facilityTypes/{id}",
    params(("id" = Uuid, Path, description = "Facility type id")),
    responses(
        (status = 204, description = "Facility type deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "facilityTypes"
)]
pub async fn delete_facility_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .facility_types
        .delete_facility_type(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
