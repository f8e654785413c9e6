use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::RequisitionGroupProgramScheduleDto;
use crate::services::processing_schedules::ProgramFacilityParams;

type LinkDto = RequisitionGroupProgramScheduleDto;

#[utoipa::path(
    get,
    path = "/api/requisitionGroupProgramSchedules",
    params(PageParams),
    responses(
        (status = 200, description = "Page of schedule links", body = Page<RequisitionGroupProgramScheduleDto>),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn list_links(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let links = state
        .services
        .requisition_group_program_schedules
        .list_links(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(links.map(|l| LinkDto::from(&l))))
}

/// Links of a program whose requisition group has the facility as a member
#[utoipa::path(
    get,
    path = "/api/requisitionGroupProgramSchedules/search",
    params(ProgramFacilityParams),
    responses(
        (status = 200, description = "Matching links", body = Vec<RequisitionGroupProgramScheduleDto>),
        (status = 400, description = "Missing parameter or unknown program or facility", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn search_links(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProgramFacilityParams>,
) -> HandlerResult {
    let links = state
        .services
        .requisition_group_program_schedules
        .search_links(params)
        .await?;
    let body: Vec<LinkDto> = links.iter().map(LinkDto::from).collect();
    Ok(success_response(body))
}

#[utoipa::path(
    get,
    path = "/api/requisitionGroupProgramSchedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule link id")),
    responses(
        (status = 200, description = "Schedule link", body = RequisitionGroupProgramScheduleDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn get_link(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let link = state
        .services
        .requisition_group_program_schedules
        .get_link(path_id(&id)?)
        .await?;
    Ok(success_response(LinkDto::from(&link)))
}

#[utoipa::path(
    post,
    path = "/api/requisitionGroupProgramSchedules",
    request_body = RequisitionGroupProgramScheduleDto,
    responses(
        (status = 201, description = "Schedule link created", body = RequisitionGroupProgramScheduleDto),
        (status = 400, description = "Unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Group already linked for the program", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn create_link(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<LinkDto>,
) -> HandlerResult {
    let link = state
        .services
        .requisition_group_program_schedules
        .create_link(dto)
        .await?;
    Ok(created_response(LinkDto::from(&link)))
}

#[utoipa::path(
    put,
    path = "/api/requisitionGroupProgramSchedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule link id")),
    request_body = RequisitionGroupProgramScheduleDto,
    responses(
        (status = 200, description = "Schedule link saved", body = RequisitionGroupProgramScheduleDto),
        (status = 400, description = "Unknown reference", body = crate::errors::ErrorResponse),
        (status = 409, description = "Group already linked for the program", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn save_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<LinkDto>,
) -> HandlerResult {
    let link = state
        .services
        .requisition_group_program_schedules
        .save_link(path_id(&id)?, dto)
        .await?;
    Ok(success_response(LinkDto::from(&link)))
}

#[utoipa::path(
    delete,
    path = "/api/requisitionGroupProgramSchedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule link id")),
    responses(
        (status = 204, description = "Schedule link deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "requisitionGroupProgramSchedules"
)]
pub async fn delete_link(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    state
        .services
        .requisition_group_program_schedules
        .delete_link(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
