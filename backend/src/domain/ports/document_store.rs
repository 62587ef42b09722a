//! Port abstraction for document store adapters and their errors.
use async_trait::async_trait;

use crate::domain::pipeline::{AggregateQuery, Filter};
use crate::domain::{Document, RecordId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// A command or aggregation failed during execution.
        Query { message: String } => "document store query failed: {message}",
        /// A document could not be encoded or decoded.
        Encoding { message: String } => "document store encoding failed: {message}",
    }
}

/// Driven port over named collections of BSON documents.
///
/// Collections are created lazily by the first insert. All identifiers are
/// `_id` values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the store answers.
    async fn ping(&self) -> Result<(), DocumentStoreError>;

    /// Number of documents in `collection`, ignoring any pipeline.
    async fn count(&self, collection: &str) -> Result<u64, DocumentStoreError>;

    /// Run the stages, then sort, skip and limit.
    async fn aggregate(
        &self,
        collection: &str,
        query: &AggregateQuery,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Insert a document without `_id` and return the generated identifier.
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<RecordId, DocumentStoreError>;

    /// Overwrite the given top-level fields of one document.
    ///
    /// Returns the number of matched documents.
    async fn update_one(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<u64, DocumentStoreError>;

    /// Remove one document and return the number removed.
    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, DocumentStoreError>;

    /// First document matching `filter`, in store order.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError>;
}
