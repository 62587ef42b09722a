//! Product category endpoints.
//!
//! ```text
//! GET /api/categories?page=1&perPage=10
//! POST /api/categories {"name":"Dairy","icon":"milk.png"}
//! GET|POST|DELETE /api/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use pagination::ListQuery;

use crate::domain::catalogue::{Category, CategoryDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{ListQueryParams, list_params};
use crate::inbound::http::schemas::{CategoryPage, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// List categories, one page at a time.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListQueryParams),
    responses(
        (status = 200, description = "Category page", body = CategoryPage),
        (status = 400, description = "Invalid list query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let params = list_params(query.into_inner())?;
    let page = state.categories.list_items(&params, &[]).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDraft,
    responses(
        (status = 201, description = "Created category", body = Category),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<HttpResponse> {
    let category = state.categories.create_item(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Unknown category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Category>> {
    let category = state.categories.read_item(id.as_str(), &[]).await?;
    Ok(web::Json(category))
}

/// Apply changes to a category.
#[utoipa::path(
    post,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    request_body = CategoryDraft,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[post("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<web::Json<Category>> {
    let category = state
        .categories
        .update_item(id.as_str(), payload.into_inner())
        .await?;
    Ok(web::Json(category))
}

/// Remove a category.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category removed", body = bool),
        (status = 404, description = "Unknown category", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<bool>> {
    let deleted = state.categories.delete_item(id.as_str()).await?;
    Ok(web::Json(deleted))
}
