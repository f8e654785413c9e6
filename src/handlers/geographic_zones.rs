use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::GeographicZoneDto;
use crate::services::geographic_zones::GeographicZoneSearchParams;

#[utoipa::path(
    get,
    path = "/api/geographicZones",
    params(PageParams),
    responses(
        (status = 200, description = "Page of geographic zones", body = Page<GeographicZoneDto>),
    ),
    tag = "geographicZones"
)]
pub async fn list_zones(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let zones = state
        .services
        .geographic_zones
        .list_zones(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(zones.map(|z| GeographicZoneDto::from(&z))))
}

/// Search zones by name, code, parent zone and level number
#[utoipa::path(
    post,
    path = "/api/geographicZones/search",
    params(PageParams),
    request_body = GeographicZoneSearchParams,
    responses(
        (status = 200, description = "Matching zones", body = Page<GeographicZoneDto>),
        (status = 400, description = "Unknown parent zone or level", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicZones"
)]
pub async fn search_zones(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiJson(params): ApiJson<GeographicZoneSearchParams>,
) -> HandlerResult {
    let zones = state
        .services
        .geographic_zones
        .search(params, page.to_request(&state.config)?)
        .await?;
    Ok(success_response(zones.map(|z| GeographicZoneDto::from(&z))))
}

#[utoipa::path(
    get,
    path = "/api/geographicZones/{id}",
    params(("id" = Uuid, Path, description = "Geographic zone id")),
    responses(
        (status = 200, description = "Geographic zone", body = GeographicZoneDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicZones"
)]
pub async fn get_zone(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let zone = state.services.geographic_zones.get_zone(path_id(&id)?).await?;
    Ok(success_response(GeographicZoneDto::from(&zone)))
}

#[utoipa::path(
    post,
    path = "/api/geographicZones",
    request_body = GeographicZoneDto,
    responses(
        (status = 201, description = "Geographic zone created", body = GeographicZoneDto),
        (status = 400, description = "Invalid input or unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicZones"
)]
pub async fn create_zone(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<GeographicZoneDto>,
) -> HandlerResult {
    let zone = state.services.geographic_zones.create_zone(dto).await?;
    Ok(created_response(GeographicZoneDto::from(&zone)))
}

#[utoipa::path(
    put,
    path = "/api/geographicZones/{id}",
    params(("id" = Uuid, Path, description = "Geographic zone id")),
    request_body = GeographicZoneDto,
    responses(
        (status = 200, description = "Geographic zone saved", body = GeographicZoneDto),
        (status = 400, description = "Invalid input, unknown reference or cyclic parent", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicZones"
)]
pub async fn save_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<GeographicZoneDto>,
) -> HandlerResult {
    let zone = state
        .services
        .geographic_zones
        .save_zone(path_id(&id)?, dto)
        .await?;
    Ok(success_response(GeographicZoneDto::from(&zone)))
}

#[utoipa::path(
    delete,
    path = "/api/geographicZones/{id}",
    params(("id" = Uuid, Path, description = "Geographic zone id")),
    responses(
        (status = 204, description = "Geographic zone deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicZones"
)]
pub async fn delete_zone(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    state
        .services
        .geographic_zones
        .delete_zone(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
