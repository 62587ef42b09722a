//! MongoDB-backed document store.
//!
//! The adapter owns a [`Database`] handle; connection pooling and
//! reconnection stay inside the driver.

mod render;

use async_trait::async_trait;
use bson::{Bson, doc};
use futures_util::TryStreamExt;
use ::mongodb::error::ErrorKind;
use ::mongodb::{Client, Collection, Database};
use tracing::debug;

use crate::domain::pipeline::{AggregateQuery, Filter};
use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{Document, RecordId};

/// Document store backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    /// Wrap an existing database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Connect to `url` and use the database `name`.
    ///
    /// The driver connects lazily; a bad host surfaces on the first command.
    pub async fn connect(url: &str, name: &str) -> Result<Self, DocumentStoreError> {
        let client = Client::with_uri_str(url).await.map_err(map_error)?;
        Ok(Self::new(client.database(name)))
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

fn map_error(error: ::mongodb::error::Error) -> DocumentStoreError {
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => DocumentStoreError::connection(error.to_string()),
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            DocumentStoreError::encoding(error.to_string())
        }
        _ => DocumentStoreError::query(error.to_string()),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn count(&self, collection: &str) -> Result<u64, DocumentStoreError> {
        self.collection(collection)
            .count_documents(doc! {})
            .await
            .map_err(map_error)
    }

    async fn aggregate(
        &self,
        collection: &str,
        query: &AggregateQuery,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let pipeline = render::pipeline(query);
        debug!(collection, stages = pipeline.len(), "aggregate");
        self.collection(collection)
            .aggregate(pipeline)
            .await
            .map_err(map_error)?
            .try_collect()
            .await
            .map_err(map_error)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<RecordId, DocumentStoreError> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(map_error)?;
        match result.inserted_id {
            Bson::ObjectId(id) => {
                debug!(collection, %id, "insert_one");
                Ok(id)
            }
            other => Err(DocumentStoreError::encoding(format!(
                "inserted _id is not an ObjectId: {other}"
            ))),
        }
    }

    async fn update_one(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<u64, DocumentStoreError> {
        let result = self
            .collection(collection)
            .update_one(render::filter(&Filter::Id(id)), doc! { "$set": fields })
            .await
            .map_err(map_error)?;
        debug!(collection, %id, matched = result.matched_count, "update_one");
        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, DocumentStoreError> {
        let result = self
            .collection(collection)
            .delete_one(render::filter(&Filter::Id(id)))
            .await
            .map_err(map_error)?;
        debug!(collection, %id, deleted = result.deleted_count, "delete_one");
        Ok(result.deleted_count)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError> {
        self.collection(collection)
            .find_one(render::filter(filter))
            .await
            .map_err(map_error)
    }
}
