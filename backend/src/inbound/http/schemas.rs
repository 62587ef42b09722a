//! OpenAPI schema definitions for types owned outside the HTTP adapter.
//!
//! The error payload keeps its fields private and the pagination envelope
//! lives in its own crate, so neither derives `ToSchema`. The wrappers here
//! mirror their wire shape for documentation only.

use utoipa::ToSchema;

use crate::domain::catalogue::{Category, Product, RecipeSummary};

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// HTTP status of the failure: 400, 404 or 500.
    #[schema(example = 400, minimum = 400, maximum = 599)]
    code: u16,
    /// Fine-grained reason.
    #[schema(example = "product.name.missing")]
    error: String,
    /// Human-readable message returned to clients.
    #[schema(example = "Product name is missing")]
    message: String,
    /// Request trace identifier, echoed in the `trace-id` header.
    #[schema(example = "4b2c1f1e-3d8a-4f3b-9c1a-5e7d2b6a0f11")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`pagination::PageMeta`].
#[derive(ToSchema)]
#[schema(as = pagination::PageMeta)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetaSchema {
    /// Number of records in the collection.
    #[schema(example = 11)]
    total_count: u64,
    /// Number of pages of the requested size.
    #[schema(example = 3)]
    total_page_count: u64,
}

/// One page of categories.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CategoryPage {
    data: Vec<Category>,
    meta: PageMetaSchema,
}

/// One page of products.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductPage {
    data: Vec<Product>,
    meta: PageMetaSchema,
}

/// One page of recipe summaries.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RecipePage {
    data: Vec<RecipeSummary>,
    meta: PageMetaSchema,
}
