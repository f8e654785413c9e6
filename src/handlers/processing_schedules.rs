use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::ProcessingScheduleDto;
use crate::services::processing_schedules::ProgramFacilityParams;

#[utoipa::path(
    get,
    path = "/api/processingSchedules",
    params(PageParams),
    responses(
        (status = 200, description = "Page of processing schedules", body = Page<ProcessingScheduleDto>),
    ),
    tag = "processingSchedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let schedules = state
        .services
        .processing_schedules
        .list_schedules(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(
        schedules.map(|s| ProcessingScheduleDto::from(&s)),
    ))
}

/// Schedules a facility follows for a program
#[utoipa::path(
    get,
    path = "/api/processingSchedules/search",
    params(ProgramFacilityParams),
    responses(
        (status = 200, description = "Linked schedules", body = Vec<ProcessingScheduleDto>),
        (status = 400, description = "Missing parameter or unknown program or facility", body = crate::errors::ErrorResponse),
    ),
    tag = "processingSchedules"
)]
pub async fn search_schedules(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProgramFacilityParams>,
) -> HandlerResult {
    let schedules = state
        .services
        .processing_schedules
        .search_schedules(params)
        .await?;
    let body: Vec<ProcessingScheduleDto> =
        schedules.iter().map(ProcessingScheduleDto::from).collect();
    Ok(success_response(body))
}

#[utoipa::path(
    get,
    path = "/api/processingSchedules/{id}",
    params(("id" = Uuid, Path, description = "Processing schedule id")),
    responses(
        (status = 200, description = "Processing schedule", body = ProcessingScheduleDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "processingSchedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let schedule = state
        .services
        .processing_schedules
        .get_schedule(path_id(&id)?)
        .await?;
    Ok(success_response(ProcessingScheduleDto::from(&schedule)))
}

#[utoipa::path(
    post,
    path = "/api/processingSchedules",
    request_body = ProcessingScheduleDto,
    responses(
        (status = 201, description = "Processing schedule created", body = ProcessingScheduleDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code or name taken", body = crate::errors::ErrorResponse),
    ),
    tag = "processingSchedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ProcessingScheduleDto>,
) -> HandlerResult {
    let schedule = state
        .services
        .processing_schedules
        .create_schedule(dto)
        .await?;
    Ok(created_response(ProcessingScheduleDto::from(&schedule)))
}

#[utoipa::path(
    put,
    path = "/api/processingSchedules/{id}",
    params(("id" = Uuid, Path, description = "Processing schedule id")),
    request_body = ProcessingScheduleDto,
    responses(
        (status = 200, description = "Processing schedule saved", body = ProcessingScheduleDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code or name taken", body = crate::errors::ErrorResponse),
    ),
    tag = "processingSchedules"
)]
pub async fn save_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<ProcessingScheduleDto>,
) -> HandlerResult {
    let schedule = state
        .services
        .processing_schedules
        .save_schedule(path_id(&id)?, dto)
        .await?;
    Ok(success_response(ProcessingScheduleDto::from(&schedule)))
}

#[utoipa::path(
    delete,
    path = "/api/processingSchedules/{id}",
    params(("id" = Uuid, Path, description = "Processing schedule id")),
    responses(
        (status = 204, description = "Processing schedule deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "processingSchedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .processing_schedules
        .delete_schedule(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
