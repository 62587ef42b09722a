//! Store-agnostic aggregation DSL.
//!
//! Resources describe joins and derived fields as [`Stage`] values; each
//! store adapter interprets them. Keeping the vocabulary this small is what
//! lets the in-memory store and the MongoDB adapter agree on semantics.
//!
//! Paths are dotted field names. Where a path crosses an array of
//! sub-documents (`ingredients.ingredientId`) it addresses the field in every
//! element.

use bson::Bson;
use pagination::SortDirection;

use crate::domain::RecordId;

/// One transformation step applied before sorting and pagination.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Collect documents of `from` whose `foreign_field` equals a value at
    /// `local_field` into the array `as_field`.
    Lookup {
        /// Joined collection.
        from: String,
        /// Path in the current document.
        local_field: String,
        /// Path in the joined documents.
        foreign_field: String,
        /// Output array field.
        as_field: String,
    },
    /// Derive `field` from an expression. A missing result removes the field.
    Set {
        /// Output field.
        field: String,
        /// Value to store.
        expr: Expr,
    },
    /// Drop fields.
    Unset(Vec<String>),
    /// Keep only the document with this identifier.
    MatchId(RecordId),
}

impl Stage {
    /// Convenience constructor for [`Stage::Lookup`].
    pub fn lookup(
        from: impl Into<String>,
        local_field: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self::Lookup {
            from: from.into(),
            local_field: local_field.into(),
            foreign_field: foreign_field.into(),
            as_field: as_field.into(),
        }
    }

    /// Convenience constructor for [`Stage::Set`].
    pub fn set(field: impl Into<String>, expr: Expr) -> Self {
        Self::Set {
            field: field.into(),
            expr,
        }
    }

    /// Convenience constructor for [`Stage::Unset`].
    pub fn unset<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Unset(paths.into_iter().map(Into::into).collect())
    }
}

/// Derived value for [`Stage::Set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// First element of the array at the path; missing when empty.
    First(String),
    /// Number of elements of the array at the path; zero when missing.
    Size(String),
    /// First non-null value among the paths; missing when all are.
    Coalesce(Vec<String>),
    /// For every element of `array`, set `as_field` to the first document in
    /// the array `source` whose `_id` equals the element's `key`.
    AttachMatches {
        /// Array of sub-documents to enrich.
        array: String,
        /// Reference field inside each element.
        key: String,
        /// Array of candidate documents, usually produced by a lookup.
        source: String,
        /// Field receiving the matched document inside each element.
        as_field: String,
    },
}

impl Expr {
    /// Convenience constructor for [`Expr::Coalesce`].
    pub fn coalesce<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Coalesce(paths.into_iter().map(Into::into).collect())
    }
}

/// Ordering applied after the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Path compared between documents.
    pub field: String,
    /// Direction of the comparison.
    pub direction: SortDirection,
}

/// Complete aggregation request handed to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateQuery {
    /// Stages, in order.
    pub stages: Vec<Stage>,
    /// Optional ordering; `None` keeps the store's native order.
    pub sort: Option<SortSpec>,
    /// Documents dropped from the front after sorting.
    pub skip: u64,
    /// Maximum number of documents returned.
    pub limit: u64,
}

/// Single-document lookup criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match on `_id`.
    Id(RecordId),
    /// Match on a field value.
    FieldEq {
        /// Path compared.
        field: String,
        /// Expected value.
        value: Bson,
    },
}

impl Filter {
    /// Convenience constructor for [`Filter::FieldEq`].
    pub fn field_eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }
}
