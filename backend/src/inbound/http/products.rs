//! Product endpoints.
//!
//! ```text
//! GET /api/products?sortBy=name&order=DESC
//! POST /api/products {"name":"Milk","icon":"milk.png","category":{"_id":"65f1c0ffee00000000000001"}}
//! GET|POST|DELETE /api/products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use pagination::ListQuery;

use crate::domain::catalogue::{Product, ProductDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{ListQueryParams, list_params};
use crate::inbound::http::schemas::{ErrorSchema, ProductPage};
use crate::inbound::http::state::HttpState;

/// List products with their categories joined, one page at a time.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListQueryParams),
    responses(
        (status = 200, description = "Product page", body = ProductPage),
        (status = 400, description = "Invalid list query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let params = list_params(query.into_inner())?;
    let page = state.products.list(&params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductDraft>,
) -> ApiResult<HttpResponse> {
    let product = state.products.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Unknown product", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let product = state.products.read(id.as_str()).await?;
    Ok(web::Json(product))
}

/// Apply changes to a product.
#[utoipa::path(
    post,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[post("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<ProductDraft>,
) -> ApiResult<web::Json<Product>> {
    let product = state
        .products
        .update(id.as_str(), payload.into_inner())
        .await?;
    Ok(web::Json(product))
}

/// Remove a product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product removed", body = bool),
        (status = 404, description = "Unknown product", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<bool>> {
    let deleted = state.products.delete(id.as_str()).await?;
    Ok(web::Json(deleted))
}
