use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::RequisitionGroupDto;

#[utoipa::path(
    get,
    path = "/api/requisitionGroups",
    params(PageParams),
    responses(
        (status = 200, description = "Page of requisition groups", body = Page<RequisitionGroupDto>),
    ),
    tag = "requisitionGroups"
)]
pub async fn list_groups(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let groups = state
        .services
        .requisition_groups
        .list_groups(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(groups))
}

#[utoipa::path(
    get,
    path = "/api/requisitionGroups/{id}",
    params(("id" = Uuid, Path, description = "Requisition group id")),
    responses(
        (status = 200, description = "Requisition group with its members", body = RequisitionGroupDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroups"
)]
pub async fn get_group(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let group = state
        .services
        .requisition_groups
        .get_group(path_id(&id)?)
        .await?;
    Ok(success_response(group))
}

#[utoipa::path(
    post,
    path = "/api/requisitionGroups",
    request_body = RequisitionGroupDto,
    responses(
        (status = 201, description = "Requisition group created", body = RequisitionGroupDto),
        (status = 400, description = "Invalid input or unknown node or member", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroups"
)]
pub async fn create_group(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<RequisitionGroupDto>,
) -> HandlerResult {
    let group = state.services.requisition_groups.create_group(dto).await?;
    Ok(created_response(group))
}

/// Replaces the group and its member list
#[utoipa::path(
    put,
    path = "/api/requisitionGroups/{id}",
    params(("id" = Uuid, Path, description = "Requisition group id")),
    request_body = RequisitionGroupDto,
    responses(
        (status = 200, description = "Requisition group saved", body = RequisitionGroupDto),
        (status = 400, description = "Invalid input or unknown node or member", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroups"
)]
pub async fn save_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<RequisitionGroupDto>,
) -> HandlerResult {
    let group = state
        .services
        .requisition_groups
        .save_group(path_id(&id)?, dto)
        .await?;
    Ok(success_response(group))
}

#[utoipa::path(
    delete,
    path = "/api/requisitionGroups/{id}",
    params(("id" = Uuid, Path, description = "Requisition group id")),
    responses(
        (status = 204, description = "Requisition group deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroups"
)]
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .requisition_groups
        .delete_group(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
