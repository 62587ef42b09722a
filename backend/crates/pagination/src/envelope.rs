//! Response envelope for paginated lists.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Totals describing the whole collection behind a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Number of records in the collection.
    pub total_count: u64,
    /// Number of pages of the requested size, rounded up.
    pub total_page_count: u64,
}

impl PageMeta {
    /// Derive the page count for `total_count` records split into pages of
    /// `per_page`.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU64;
    /// use pagination::PageMeta;
    ///
    /// let per_page = NonZeroU64::new(5).unwrap_or(NonZeroU64::MIN);
    /// assert_eq!(PageMeta::for_total(11, per_page).total_page_count, 3);
    /// assert_eq!(PageMeta::for_total(0, per_page).total_page_count, 0);
    /// ```
    #[must_use]
    pub const fn for_total(total_count: u64, per_page: NonZeroU64) -> Self {
        Self {
            total_count,
            total_page_count: total_count.div_ceil(per_page.get()),
        }
    }
}

/// One page of records plus collection totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page, in the requested order.
    pub data: Vec<T>,
    /// Collection totals.
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Assemble a page from its records and totals.
    #[must_use]
    pub const fn new(data: Vec<T>, meta: PageMeta) -> Self {
        Self { data, meta }
    }

    /// Convert every record, keeping the totals.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Convert every record fallibly, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let data = self.data.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            data,
            meta: self.meta,
        })
    }
}
