//! Recipe endpoints.
//!
//! Lists return summaries with an ingredient count, single reads embed the
//! ingredient products.
//!
//! ```text
//! GET /api/recipes?sortBy=amount
//! POST /api/recipes {"name":"Pancakes","amount":2,"duration":"20 min",...}
//! GET|POST|DELETE /api/recipes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use pagination::ListQuery;

use crate::domain::catalogue::{Recipe, RecipeDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::listing::{ListQueryParams, list_params};
use crate::inbound::http::schemas::{ErrorSchema, RecipePage};
use crate::inbound::http::state::HttpState;

/// List recipe summaries, one page at a time.
#[utoipa::path(
    get,
    path = "/api/recipes",
    params(ListQueryParams),
    responses(
        (status = 200, description = "Recipe page", body = RecipePage),
        (status = 400, description = "Invalid list query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let params = list_params(query.into_inner())?;
    let page = state.recipes.list(&params).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a recipe.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeDraft,
    responses(
        (status = 201, description = "Created recipe", body = Recipe),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeDraft>,
) -> ApiResult<HttpResponse> {
    let recipe = state.recipes.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(recipe))
}

/// Fetch one recipe.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Recipe>> {
    let recipe = state.recipes.read(id.as_str()).await?;
    Ok(web::Json(recipe))
}

/// Apply changes to a recipe.
#[utoipa::path(
    post,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = RecipeDraft,
    responses(
        (status = 200, description = "Updated recipe", body = Recipe),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[post("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<RecipeDraft>,
) -> ApiResult<web::Json<Recipe>> {
    let recipe = state
        .recipes
        .update(id.as_str(), payload.into_inner())
        .await?;
    Ok(web::Json(recipe))
}

/// Remove a recipe.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe removed", body = bool),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<bool>> {
    let deleted = state.recipes.delete(id.as_str()).await?;
    Ok(web::Json(deleted))
}
