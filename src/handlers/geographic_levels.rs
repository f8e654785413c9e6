use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::GeographicLevelDto;

/// List geographic levels ordered by level number
#[utoipa::path(
    get,
    path = "/api/geographicLevels",
    params(PageParams),
    responses(
        (status = 200, description = "Page of geographic levels", body = Page<GeographicLevelDto>),
    ),
    tag = "geographicLevels"
)]
pub async fn list_levels(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let levels = state
        .services
        .geographic_levels
        .list_levels(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(levels.map(|l| GeographicLevelDto::from(&l))))
}

#[utoipa::path(
    get,
    path = "/api/geographicLevels/{id}",
    params(("id" = Uuid, Path, description = "Geographic level id")),
    responses(
        (status = 200, description = "Geographic level", body = GeographicLevelDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicLevels"
)]
pub async fn get_level(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let level = state
        .services
        .geographic_levels
        .get_level(path_id(&id)?)
        .await?;
    Ok(success_response(GeographicLevelDto::from(&level)))
}

#[utoipa::path(
    post,
    path = "/api/geographicLevels",
    request_body = GeographicLevelDto,
    responses(
        (status = 201, description = "Geographic level created", body = GeographicLevelDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code or level number taken", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicLevels"
)]
pub async fn create_level(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<GeographicLevelDto>,
) -> HandlerResult {
    let level = state.services.geographic_levels.create_level(dto).await?;
    Ok(created_response(GeographicLevelDto::from(&level)))
}

#[utoipa::path(
    put,
    path = "/api/geographicLevels/{id}",
    params(("id" = Uuid, Path, description = "Geographic level id")),
    request_body = GeographicLevelDto,
    responses(
        (status = 200, description = "Geographic level saved", body = GeographicLevelDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code or level number taken", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicLevels"
)]
pub async fn save_level(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<GeographicLevelDto>,
) -> HandlerResult {
    let level = state
        .services
        .geographic_levels
        .save_level(path_id(&id)?, dto)
        .await?;
    Ok(success_response(GeographicLevelDto::from(&level)))
}

#[utoipa::path(
    delete,
    path = "/api/geographicLevels/{id}",
    params(("id" = Uuid, Path, description = "Geographic level id")),
    responses(
        (status = 204, description = "Geographic level deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geographicLevels"
)]
pub async fn delete_level(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    state
        .services
        .geographic_levels
        .delete_level(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
