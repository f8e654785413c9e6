use axum::extract::{Path, State};

use super::common::{
    created_response, no_content_response, path_id, success_response, ApiJson, ApiQuery,
    HandlerResult, PageParams,
};
use super::AppState;
use crate::common::Page;
use crate::dto::ProductCategoryDto;
use crate::services::product_categories::ProductCategorySearchParams;

#[utoipa::path(
    get,
    path = "/api/productCategories",
    params(PageParams),
    responses(
        (status = 200, description = "Page of product categories", body = Page<ProductCategoryDto>),
    ),
    tag = "productCategories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageParams>,
) -> HandlerResult {
    let categories = state
        .services
        .product_categories
        .list_categories(page.to_request(&state.config)?)
        .await?;
    Ok(success_response(
        categories.map(|c| ProductCategoryDto::from(&c)),
    ))
}

/// Every category, or the one with the given code
#[utoipa::path(
    get,
    path = "/api/productCategories/search",
    params(ProductCategorySearchParams),
    responses(
        (status = 200, description = "Matching categories", body = Vec<ProductCategoryDto>),
        (status = 404, description = "No category has the code", body = crate::errors::ErrorResponse),
    ),
    tag = "productCategories"
)]
pub async fn search_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ProductCategorySearchParams>,
) -> HandlerResult {
    let categories = state
        .services
        .product_categories
        .search_categories(params)
        .await?;
    let body: Vec<ProductCategoryDto> = categories.iter().map(ProductCategoryDto::from).collect();
    Ok(success_response(body))
}

#[utoipa::path(
    get,
    path = "/api/productCategories/{id}",
    params(("id" = Uuid, Path, description = "Product category id")),
    responses(
        (status = 200, description = "Product category", body = ProductCategoryDto),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "productCategories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let category = state
        .services
        .product_categories
        .get_category(path_id(&id)?)
        .await?;
    Ok(success_response(ProductCategoryDto::from(&category)))
}

/// Creates a category; posting a code that already exists replaces that category
#[utoipa::path(
    post,
    path = "/api/productCategories",
    request_body = ProductCategoryDto,
    responses(
        (status = 201, description = "Product category created or replaced", body = ProductCategoryDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
    ),
    tag = "productCategories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<ProductCategoryDto>,
) -> HandlerResult {
    let category = state
        .services
        .product_categories
        .create_category(dto)
        .await?;
    Ok(created_response(ProductCategoryDto::from(&category)))
}

#[utoipa::path(
    put,
    path = "/api/productCategories/{id}",
    params(("id" = Uuid, Path, description = "Product category id")),
    request_body = ProductCategoryDto,
    responses(
        (status = 200, description = "Product category saved", body = ProductCategoryDto),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code taken", body = crate::errors::ErrorResponse),
    ),
    tag = "productCategories"
)]
pub async fn save_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<ProductCategoryDto>,
) -> HandlerResult {
    let category = state
        .services
        .product_categories
        .save_category(path_id(&id)?, dto)
        .await?;
    Ok(success_response(ProductCategoryDto::from(&category)))
}

#[utoipa::path(
    delete,
    path = "/api/productCategories/{id}",
    params(("id" = Uuid, Path, description = "Product category id")),
    responses(
        (status = 204, description = "Product category deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
    ),
    tag = "productCategories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    state
        .services
        .product_categories
        .delete_category(path_id(&id)?)
        .await?;
    Ok(no_content_response())
}
