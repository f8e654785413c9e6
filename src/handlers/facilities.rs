use axum::extract::{Path, RawQuery, State};
use utoipa::IntoParams;

use super::common::{
    created_response, no_content_response, parse_flag, parse_number, path_id, success_response,
    ApiJson, ApiQuery, HandlerResult, PageParams,
};
use super::AppState;
use crate::common::{parse_uuid, Page};
use crate::dto::FacilityDto;
use crate::errors::ServiceError;
use crate::messages;
use crate::services::facilities::FacilitySearchParams;

/// Query string accepted by `GET /facilities`. Only used for the OpenAPI document;
/// the repeatable `id` parameter is parsed by [`parse_facility_query`].
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
struct FacilityQueryDoc {
    /// Facility id, may be repeated
    id: Option<Vec<uuid::Uuid>>,
    /// Case-insensitive code fragment
    code: Option<String>,
    /// Case-insensitive name fragment
    name: Option<String>,
    /// Exact facility type code
    #[param(rename = "type")]
    facility_type: Option<String>,
    #[param(rename = "zoneId")]
    zone_id: Option<uuid::Uuid>,
    /// Include facilities of every zone below `zoneId`
    recurse: Option<bool>,
    page: Option<u64>,
    size: Option<u64>,
}

/// Splits a raw query string into facility criteria and paging.
pub fn parse_facility_query(
    raw: Option<&str>,
) -> Result<(FacilitySearchParams, PageParams), ServiceError> {
    let mut params = FacilitySearchParams::default();
    let mut page = PageParams::default();

    for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        match key.as_ref() {
            "id" => {
                params.ids.insert(parse_uuid(&value)?);
            }
            "code" => params.code = Some(value.into_owned()),
            "name" => params.name = Some(value.into_owned()),
            "type" => params.facility_type_code = Some(value.into_owned()),
            "zoneId" => params.zone_id = Some(parse_uuid(&value)?),
            "recurse" => params.recurse = parse_flag(&key, &value)?,
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
    Ok((params, page))
}

/// List facilities, optionally filtered by ids or search criteria
#[utoipa::path(
    get,
    path = "/api/facilities",
    params(FacilityQueryDoc),
    responses(
        (status = 200, description = "Matching facilities", body = Page<FacilityDto>),
        (status = 400, description = "Malformed parameter or unknown zone or type", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn get_facilities(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> HandlerResult {
    let (params, page) = parse_facility_query(raw.as_deref())?;
    let facilities = state.services.facilities.get_facilities(params).await?;
    let page = Page::from_vec(facilities, page.to_request(&state.config)?);
    Ok(success_response(page.map(|f| FacilityDto::from(&f))))
}

#[utoipa::path(
    post,
    path = "/api/facilities/search",
    params(PageParams),
    request_body = FacilitySearchParams,
    responses(
        (status = 200, description = "Matching facilities", body = Page<FacilityDto>),
        (status = 400, description = "Unknown zone or facility type", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn search_facilities(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiJson(params): ApiJson<FacilitySearchParams>,
) -> HandlerResult {
    let facilities = state.services.facilities.search_facilities(params).await?;
    let page = Page::from_vec(facilities, page.to_request(&state.config)?);
    Ok(success_response(page.map(|f| FacilityDto::from(&f))))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility id")),
    responses(
        (status = 200, description = "Facility", body = FacilityDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn get_facility(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let facility = state.services.facilities.get_facility(path_id(&id)?).await?;
    Ok(success_response(FacilityDto::from(&facility)))
}

#[utoipa::path(
    post,
    path = "/api/facilities",
    request_body = FacilityDto,
    responses(
        (status = 201, description = "Facility created", body = FacilityDto),
        (status = 400, description = "Invalid input or unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn create_facility(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<FacilityDto>,
) -> HandlerResult {
    let facility = state.services.facilities.create_facility(dto).await?;
    Ok(created_response(FacilityDto::from(&facility)))
}

#[utoipa::path(
    put,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility id")),
    request_body = FacilityDto,
    responses(
        (status = 200, description = "Facility saved", body = FacilityDto),
        (status = 400, description = "Invalid input or unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn save_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<FacilityDto>,
) -> HandlerResult {
    let facility = state
        .services
        .facilities
        .save_facility(path_id(&id)?, dto)
        .await?;
    Ok(success_response(FacilityDto::from(&facility)))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility id")),
    responses(
        (status = 204, description = "Facility deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "facilities"
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .facilities
        .delete_facility(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
