use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::SupervisoryNodeDto;
use crate::services::processing_schedules::ProgramFacilityParams;

#[utoipa::path(
    get,
    path = "/api/supervisoryNodes",
    params(PageParams),
    responses(
        (status = 200, description = "Page of supervisory nodes", body = Page<SupervisoryNodeDto>),
    ),
    tag = "supervisoryNodes"
)]
pub async fn list_nodes(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let nodes = state
        .services
        .supervisory_nodes
        .list_nodes(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(nodes))
}

/// Nodes supervising the requisition groups that serve a program at a facility
#[utoipa::path(
    get,
    path = "/api/supervisoryNodes/search",
    params(ProgramFacilityParams),
    responses(
        (status = 200, description = "Supervising nodes", body = Vec<SupervisoryNodeDto>),
        (status = 400, description = "Missing parameter or unknown program or facility", body = crate::errors::ErrorResponse),
        (status = 404, description = "No node supervises the pair", body = crate::errors::ErrorResponse),
    ),
    tag = "supervisoryNodes"
)]
pub async fn search_nodes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProgramFacilityParams>,
) -> HandlerResult {
    let nodes = state.services.supervisory_nodes.search_nodes(params).await?;
    Ok(success_response(nodes))
}

#[utoipa::path(
    get,
    path = "/api/supervisoryNodes/{id}",
    params(("id" = Uuid, Path, description = "Supervisory node id")),
    responses(
        (status = 200, description = "Supervisory node", body = SupervisoryNodeDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "supervisoryNodes"
)]
pub async fn get_node(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let node = state
        .services
        .supervisory_nodes
        .get_node(path_id(&id)?)
        .await?;
    Ok(success_response(node))
}

#[utoipa::path(
    post,
    path = "/api/supervisoryNodes",
    request_body = SupervisoryNodeDto,
    responses(
        (status = 201, description = "Supervisory node created", body = SupervisoryNodeDto),
        (status = 400, description = "Invalid input or unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "supervisoryNodes"
)]
pub async fn create_node(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<SupervisoryNodeDto>,
) -> HandlerResult {
    let node = state.services.supervisory_nodes.create_node(dto).await?;
    Ok(created_response(node))
}

#[utoipa::path(
    put,
    path = "/api/supervisoryNodes/{id}",
    params(("id" = Uuid, Path, description = "Supervisory node id")),
    request_body = SupervisoryNodeDto,
    responses(
        (status = 200, description = "Supervisory node saved", body = SupervisoryNodeDto),
        (status = 400, description = "Invalid input, unknown reference or cyclic parent", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "supervisoryNodes"
)]
pub async fn save_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<SupervisoryNodeDto>,
) -> HandlerResult {
    let node = state
        .services
        .supervisory_nodes
        .save_node(path_id(&id)?, dto)
        .await?;
    Ok(success_response(node))
}

/// Deletes the node; its children are detached and become roots
#[utoipa::path(
    delete,
    path = "/api/supervisoryNodes/{id}",
    params(("id" = Uuid, Path, description = "Supervisory node id")),
    responses(
        (status = 204, description = "Supervisory node deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "supervisoryNodes"
)]
pub async fn delete_node(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    state
        .services
        .supervisory_nodes
        .delete_node(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
