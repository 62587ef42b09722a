//! Shared query-string handling for list endpoints.

use pagination::{ListParams, ListQuery, PaginationError};
use utoipa::IntoParams;

use crate::domain::Error;

/// OpenAPI description of the list query string.
#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ListQueryParams {
    /// One-based page number.
    #[param(minimum = 1, default = 1)]
    page: Option<u64>,
    /// Page size.
    #[param(minimum = 1, default = 10)]
    per_page: Option<u64>,
    /// Field to order by; an empty value keeps store order.
    #[param(default = "name")]
    sort_by: Option<String>,
    /// `ASC` or `DESC`.
    #[param(default = "ASC", pattern = "^(ASC|DESC)$")]
    order: Option<String>,
}

fn map_pagination_error(err: &PaginationError) -> Error {
    Error::validation(err.code(), err.to_string())
}

/// Validate a raw list query.
pub(crate) fn list_params(query: ListQuery) -> Result<ListParams, Error> {
    ListParams::try_from(query).map_err(|err| map_pagination_error(&err))
}
