//! Page-number pagination primitives shared by recipebook list endpoints.
//!
//! The crate keeps three concerns apart:
//!
//! - [`ListParams`] is the validated request: a one-based page number, a
//!   non-zero page size, an optional sort field and a [`SortDirection`].
//! - [`ListQuery`] is the raw query-string shape (`page`, `perPage`,
//!   `sortBy`, `order`) accepted by HTTP adapters. Converting it into
//!   [`ListParams`] applies the defaults and reports [`PaginationError`] for
//!   values outside the contract.
//! - [`Page`] and [`PageMeta`] form the response envelope
//!   `{ "data": [...], "meta": { "totalCount", "totalPageCount" } }`.
//!
//! # Examples
//! ```
//! use pagination::{ListParams, PageMeta};
//!
//! let params = ListParams::default();
//! assert_eq!(params.page().get(), 1);
//! assert_eq!(params.per_page().get(), 10);
//! assert_eq!(params.sort_by(), Some("name"));
//!
//! let meta = PageMeta::for_total(11, params.per_page());
//! assert_eq!(meta.total_page_count, 2);
//! ```

mod envelope;
mod params;
mod query;

pub use envelope::{Page, PageMeta};
pub use params::{
    DEFAULT_PER_PAGE, DEFAULT_SORT_FIELD, ListParams, SortDirection, UnknownSortDirection,
};
pub use query::{ListQuery, PaginationError};
