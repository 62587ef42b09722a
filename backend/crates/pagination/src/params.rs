//! Validated list parameters.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const fn non_zero(value: u64) -> NonZeroU64 {
    match NonZeroU64::new(value) {
        Some(value) => value,
        None => panic!("page sizes must be non-zero"),
    }
}

/// Page size used when the caller does not supply one.
pub const DEFAULT_PER_PAGE: NonZeroU64 = non_zero(10);

/// Field used for ordering when the caller does not supply one.
pub const DEFAULT_SORT_FIELD: &str = "name";

/// Direction applied to the sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    /// Largest values first.
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    /// Wire spelling used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Sort multiplier in the document-store convention (`1` or `-1`).
    #[must_use]
    pub const fn as_multiplier(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort direction string is neither `ASC` nor `DESC`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0}")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if value.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(UnknownSortDirection(value.to_owned()))
        }
    }
}

/// Validated pagination and ordering request.
///
/// ## Invariants
/// - `page` and `per_page` are at least one.
/// - `sort_by == None` disables ordering; the store returns its native order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    page: NonZeroU64,
    per_page: NonZeroU64,
    sort_by: Option<String>,
    order: SortDirection,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: NonZeroU64::MIN,
            per_page: DEFAULT_PER_PAGE,
            sort_by: Some(DEFAULT_SORT_FIELD.to_owned()),
            order: SortDirection::Asc,
        }
    }
}

impl ListParams {
    /// Replace the one-based page number.
    #[must_use]
    pub const fn with_page(mut self, page: NonZeroU64) -> Self {
        self.page = page;
        self
    }

    /// Replace the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: NonZeroU64) -> Self {
        self.per_page = per_page;
        self
    }

    /// Order by the given field.
    #[must_use]
    pub fn with_sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Disable ordering entirely.
    #[must_use]
    pub fn without_sort(mut self) -> Self {
        self.sort_by = None;
        self
    }

    /// Replace the sort direction.
    #[must_use]
    pub const fn with_order(mut self, order: SortDirection) -> Self {
        self.order = order;
        self
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> NonZeroU64 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn per_page(&self) -> NonZeroU64 {
        self.per_page
    }

    /// Sort field, if ordering is enabled.
    #[must_use]
    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    /// Sort direction.
    #[must_use]
    pub const fn order(&self) -> SortDirection {
        self.order
    }

    /// Number of records preceding the requested page.
    ///
    /// Saturates instead of overflowing for absurd page numbers, which
    /// simply yields an empty page.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page.get() - 1).saturating_mul(self.per_page.get())
    }

    /// Maximum number of records on the requested page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.per_page.get()
    }
}
