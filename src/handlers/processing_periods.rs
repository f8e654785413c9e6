use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::ProcessingPeriodDto;
use crate::services::processing_periods::ProcessingPeriodSearchParams;

/// Periods of a schedule, given directly or resolved from a program and facility
#[utoipa::path(
    get,
    path = "/api/processingPeriods",
    params(ProcessingPeriodSearchParams, PageParams),
    responses(
        (status = 200, description = "Page of processing periods", body = Page<ProcessingPeriodDto>),
        (status = 400, description = "Incomplete search parameters", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown schedule, program or facility", body = crate::errors::ErrorResponse),
    ),
    tag = "processingPeriods"
)]
pub async fn search_periods(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProcessingPeriodSearchParams>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let periods = state
        .services
        .processing_periods
        .search_periods(params, page.to_request(&state.config)?)
        .await?;
    Ok(success_response(periods.map(|p| ProcessingPeriodDto::from(&p))))
}

#[utoipa::path(
    get,
    path = "/api/processingPeriods/{id}",
    params(("id" = Uuid, Path, description = "Processing period id")),
    responses(
        (status = 200, description = "Processing period", body = ProcessingPeriodDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "processingPeriods"
)]
pub async fn get_period(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let period = state
        .services
        .processing_periods
        .get_period(path_id(&id)?)
        .await?;
    Ok(success_response(ProcessingPeriodDto::from(&period)))
}

/// Appends a period to its schedule
#[utoipa::path(
    post,
    path = "/api/processingPeriods",
    request_body = ProcessingPeriodDto,
    responses(
        (status = 201, description = "Processing period created", body = ProcessingPeriodDto),
        (status = 400, description = "Unknown schedule, inverted dates or a gap after the last period", body = crate::errors::ErrorResponse),
    ),
    tag = "processingPeriods"
)]
pub async fn create_period(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ProcessingPeriodDto>,
) -> HandlerResult {
    let period = state.services.processing_periods.create_period(dto).await?;
    Ok(created_response(ProcessingPeriodDto::from(&period)))
}

#[utoipa::path(
    put,
    path = "/api/processingPeriods/{id}",
    params(("id" = Uuid, Path, description = "Processing period id")),
    request_body = ProcessingPeriodDto,
    responses(
        (status = 200, description = "Processing period saved", body = ProcessingPeriodDto),
        (status = 400, description = "Invalid period", body = crate::errors::ErrorResponse),
    ),
    tag = "processingPeriods"
)]
pub async fn save_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<ProcessingPeriodDto>,
) -> HandlerResult {
    let period = state
        .services
        .processing_periods
        .save_period(path_id(&id)?, dto)
        .await?;
    Ok(success_response(ProcessingPeriodDto::from(&period)))
}

#[utoipa::path(
    delete,
    path = "/api/processingPeriods/{id}",
    params(("id" = Uuid, Path, description = "Processing period id")),
    responses(
        (status = 204, description = "Processing period deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "processingPeriods"
)]
pub async fn delete_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .processing_periods
        .delete_period(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
