use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::UserDto;
use crate::services::user_search_params::UserSearchParams;

#[utoipa::path(
    get,
    path = "/api/users",
    params(PageParams),
    responses(
        (status = 200, description = "Page of users ordered by username", body = Page<UserDto>),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let users = state
        .services
        .users
        .search(UserSearchParams::default())
        .await?;
    let page = Page::from_vec(users, page.to_request(&state.config)?);
    Ok(success_response(page.map(|u| UserDto::from(&u))))
}

/// Users matching every given filter; an empty body lists everyone
#[utoipa::path(
    post,
    path = "/api/users/search",
    params(PageParams),
    request_body = UserSearchParams,
    responses(
        (status = 200, description = "Matching users", body = Page<UserDto>),
        (status = 400, description = "Unknown field or malformed id", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn search_users(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiJson(params): ApiJson<UserSearchParams>,
) -> HandlerResult {
    let users = state.services.users.search(params).await?;
    let page = Page::from_vec(users, page.to_request(&state.config)?);
    Ok(success_response(page.map(|u| UserDto::from(&u))))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    let user = state.services.users.get_user(path_id(&id)?).await?;
    Ok(success_response(UserDto::from(&user)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Missing field, bad email, duplicate or unknown home facility", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<UserDto>,
) -> HandlerResult {
    let user = state.services.users.create_user(dto).await?;
    Ok(created_response(UserDto::from(&user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UserDto,
    responses(
        (status = 200, description = "User saved", body = UserDto),
        (status = 400, description = "Missing field, bad email, duplicate or unknown home facility", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn save_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<UserDto>,
) -> HandlerResult {
    let user = state.services.users.save_user(path_id(&id)?, dto).await?;
    Ok(success_response(UserDto::from(&user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "users"
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> HandlerResult {
    state.services.users.delete_user(path_id(&id)?).await?;
    Ok(no_content_response())
}
