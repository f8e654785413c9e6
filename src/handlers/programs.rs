use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::ProgramDto;

#[utoipa::path(
    get,
    path = "/api/programs",
    params(PageParams),
    responses(
        (status = 200, description = "Page of programs", body = Page<ProgramDto>),
    ),
    tag = "programs"
)]
pub async fn list_programs(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let programs = state
        .services
        .programs
        .list_programs(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(programs.map(|p| ProgramDto::from(&p))))
}

#[utoipa::path(
    get,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program id")),
    responses(
        (status = 200, description = "Program", body = ProgramDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "programs"
)]
pub async fn get_program(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let program = state
        .services
        .programs
        .get_program(path_id(&id)?)
        .await?;
    Ok(success_response(ProgramDto::from(&program)))
}

#[utoipa::path(
    post,
    path = "/api/programs",
    request_body = ProgramDto,
    responses(
        (status = 201, description = "Program created", body = ProgramDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "programs"
)]
pub async fn create_program(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ProgramDto>,
) -> HandlerResult {
    let program = state.services.programs.create_program(dto).await?;
    Ok(created_response(ProgramDto::from(&program)))
}

#[utoipa::path(
    put,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program id")),
    request_body = ProgramDto,
    responses(
        (status = 200, description = "Program saved", body = ProgramDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "programs"
)]
pub async fn save_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<ProgramDto>,
) -> HandlerResult {
    let program = state
        .services
        .programs
        .save_program(path_id(&id)?, dto)
        .await?;
    Ok(success_response(ProgramDto::from(&program)))
}

#[utoipa::path(
    delete,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program id")),
    responses(
        (status = 204, description = "Program deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "programs"
)]
pub async fn delete_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .programs
        .delete_program(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
