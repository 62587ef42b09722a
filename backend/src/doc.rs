//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every catalogue endpoint plus the health probes
//! - **Schemas**: catalogue read models and drafts, and wrappers for the
//!   error payload and page envelope
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::catalogue::{
    Category, CategoryDraft, Ingredient, IngredientDraft, Instruction, InstructionDraft, Product,
    ProductDraft, ProductSummary, Recipe, RecipeDraft, RecipeSummary, RecordRef,
};
use crate::inbound::http::schemas::{
    CategoryPage, ErrorSchema, PageMetaSchema, ProductPage, RecipePage,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipebook backend API",
        description = "Paginated CRUD over product categories, products and recipes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::icons::list_icons,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        PageMetaSchema,
        CategoryPage,
        ProductPage,
        RecipePage,
        Category,
        CategoryDraft,
        Product,
        ProductDraft,
        RecordRef,
        Recipe,
        RecipeDraft,
        RecipeSummary,
        ProductSummary,
        Ingredient,
        IngredientDraft,
        Instruction,
        InstructionDraft,
    )),
    tags(
        (name = "categories", description = "Product categories"),
        (name = "products", description = "Products and their categories"),
        (name = "recipes", description = "Recipes and their ingredients"),
        (name = "icons", description = "Known icon file names"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn openapi_error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        for field in ["code", "error", "message", "traceId"] {
            assert_object_schema_has_field(error_schema, field);
        }
    }

    #[rstest]
    #[case("/api/products")]
    #[case("/api/products/{id}")]
    #[case("/api/categories")]
    #[case("/api/categories/{id}")]
    #[case("/api/recipes")]
    #[case("/api/recipes/{id}")]
    #[case("/api/icons")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn item_routes_carry_read_update_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/products/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }
}
