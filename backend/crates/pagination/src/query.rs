//! Raw query-string shape for list endpoints.

use std::num::NonZeroU64;

use serde::Deserialize;

use crate::params::{ListParams, SortDirection};

/// Query-string parameters as received from clients.
///
/// Values are kept as strings so the conversion into [`ListParams`] can
/// report which parameter broke the contract.
///
/// ```text
/// GET /api/products?page=2&perPage=5&sortBy=name&order=DESC
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// One-based page number; defaults to 1.
    pub page: Option<String>,
    /// Page size; defaults to 10.
    pub per_page: Option<String>,
    /// Sort field; defaults to `name`, an empty value disables ordering.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`; defaults to `ASC`.
    pub order: Option<String>,
}

/// Reasons a [`ListQuery`] cannot become [`ListParams`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// `page` is not a positive integer.
    #[error("page must be a positive integer, got {value:?}")]
    InvalidPage {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `perPage` is not a positive integer.
    #[error("perPage must be a positive integer, got {value:?}")]
    InvalidPerPage {
        /// Raw value supplied by the caller.
        value: String,
    },
    /// `order` is neither `ASC` nor `DESC`.
    #[error("order must be ASC or DESC, got {value:?}")]
    InvalidOrder {
        /// Raw value supplied by the caller.
        value: String,
    },
}

impl PaginationError {
    /// Stable machine-readable code for error envelopes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidPage { .. } => "list.page.invalid",
            Self::InvalidPerPage { .. } => "list.per_page.invalid",
            Self::InvalidOrder { .. } => "list.order.invalid",
        }
    }
}

fn parse_positive(raw: &str) -> Option<NonZeroU64> {
    raw.trim().parse::<u64>().ok().and_then(NonZeroU64::new)
}

impl TryFrom<ListQuery> for ListParams {
    type Error = PaginationError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let ListQuery {
            page,
            per_page,
            sort_by,
            order,
        } = query;
        let mut params = Self::default();

        if let Some(raw) = page {
            let parsed = parse_positive(&raw).ok_or(PaginationError::InvalidPage { value: raw })?;
            params = params.with_page(parsed);
        }
        if let Some(raw) = per_page {
            let parsed =
                parse_positive(&raw).ok_or(PaginationError::InvalidPerPage { value: raw })?;
            params = params.with_per_page(parsed);
        }
        params = match sort_by {
            Some(field) if field.trim().is_empty() => params.without_sort(),
            Some(field) => params.with_sort_by(field.trim()),
            None => params,
        };
        if let Some(raw) = order {
            let parsed = raw
                .parse::<SortDirection>()
                .map_err(|_| PaginationError::InvalidOrder { value: raw })?;
            params = params.with_order(parsed);
        }
        Ok(params)
    }
}
