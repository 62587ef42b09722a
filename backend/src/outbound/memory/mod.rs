//! In-process document store.
//!
//! Collections are vectors kept in insertion order, which is the native
//! order ties fall back to when sorting. The whole store sits behind one
//! `tokio` read-write lock so lookups see a consistent snapshot of every
//! collection they join.

mod eval;

use std::collections::HashMap;

use async_trait::async_trait;
use bson::Bson;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::pipeline::{AggregateQuery, Filter};
use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{Document, RecordId};

/// Document store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append documents to a collection, keeping any `_id` they carry.
    ///
    /// Documents without an `_id` receive a generated one.
    pub async fn seed<I>(&self, collection: &str, documents: I) -> Vec<RecordId>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut guard = self.collections.write().await;
        let target = guard.entry(collection.to_owned()).or_default();
        documents
            .into_iter()
            .map(|doc| {
                let (id, stored) = with_id(doc);
                target.push(stored);
                id
            })
            .collect()
    }
}

fn with_id(mut doc: Document) -> (RecordId, Document) {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(id)) => id,
        _ => RecordId::new(),
    };
    let mut stored = Document::new();
    stored.insert("_id", id);
    for (key, value) in doc {
        stored.insert(key, value);
    }
    (id, stored)
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64, DocumentStoreError> {
        let guard = self.collections.read().await;
        let len = guard.get(collection).map_or(0, Vec::len);
        Ok(len as u64)
    }

    async fn aggregate(
        &self,
        collection: &str,
        query: &AggregateQuery,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let guard = self.collections.read().await;
        let docs = guard.get(collection).cloned().unwrap_or_default();
        let mut docs = eval::run_stages(docs, &query.stages, &guard);
        drop(guard);

        if let Some(spec) = &query.sort {
            eval::sort(&mut docs, spec);
        }
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let page: Vec<Document> = docs.into_iter().skip(skip).take(limit).collect();
        debug!(collection, stages = query.stages.len(), returned = page.len(), "aggregate");
        Ok(page)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<RecordId, DocumentStoreError> {
        let mut guard = self.collections.write().await;
        let target = guard.entry(collection.to_owned()).or_default();
        let (id, stored) = with_id(document);
        if target.iter().any(|doc| eval::matches(doc, &Filter::Id(id))) {
            return Err(DocumentStoreError::query(format!(
                "duplicate key {id} in {collection}"
            )));
        }
        target.push(stored);
        debug!(collection, %id, "insert_one");
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: RecordId,
        fields: Document,
    ) -> Result<u64, DocumentStoreError> {
        if fields.contains_key("_id") {
            return Err(DocumentStoreError::query("the _id field is immutable"));
        }
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| eval::matches(doc, &Filter::Id(id))))
        else {
            debug!(collection, %id, "update_one matched nothing");
            return Ok(0);
        };
        for (path, value) in fields {
            eval::set_path(doc, &path, value);
        }
        debug!(collection, %id, "update_one");
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, id: RecordId) -> Result<u64, DocumentStoreError> {
        let mut guard = self.collections.write().await;
        let removed = guard.get_mut(collection).and_then(|docs| {
            docs.iter()
                .position(|doc| eval::matches(doc, &Filter::Id(id)))
                .map(|index| docs.remove(index))
        });
        debug!(collection, %id, removed = removed.is_some(), "delete_one");
        Ok(u64::from(removed.is_some()))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| eval::matches(doc, filter)))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::{SortSpec, Stage};
    use bson::doc;
    use pagination::SortDirection;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
    }

    fn names(docs: &[Document]) -> Vec<&str> {
        docs.iter()
            .map(|doc| doc.get_str("name").expect("name"))
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_ids_and_counts(store: InMemoryDocumentStore) {
        let first = store
            .insert_one("categories", doc! { "name": "Dairy" })
            .await
            .expect("insert");
        store
            .insert_one("categories", doc! { "name": "Bakery" })
            .await
            .expect("insert");

        assert_eq!(store.count("categories").await.expect("count"), 2);
        assert_eq!(store.count("recipes").await.expect("count"), 0);
        let found = store
            .find_one("categories", &Filter::Id(first))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.get_object_id("_id").expect("id"), first);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected(store: InMemoryDocumentStore) {
        let id = RecordId::new();
        store.seed("products", [doc! { "_id": id, "name": "Milk" }]).await;
        let err = store
            .insert_one("products", doc! { "_id": id, "name": "Cream" })
            .await
            .expect_err("duplicate");
        assert!(matches!(err, DocumentStoreError::Query { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn aggregate_sorts_then_pages(store: InMemoryDocumentStore) {
        store
            .seed(
                "products",
                ["Cheese", "Apple", "Bread", "Eggs", "Dates"].map(|name| doc! { "name": name }),
            )
            .await;
        let query = AggregateQuery {
            stages: Vec::new(),
            sort: Some(SortSpec {
                field: "name".into(),
                direction: SortDirection::Desc,
            }),
            skip: 1,
            limit: 2,
        };

        let page = store.aggregate("products", &query).await.expect("aggregate");
        assert_eq!(names(&page), vec!["Dates", "Cheese"]);
    }

    #[rstest]
    #[tokio::test]
    async fn aggregate_without_sort_keeps_insertion_order(store: InMemoryDocumentStore) {
        let ids = store
            .seed("products", ["b", "a", "c"].map(|name| doc! { "name": name }))
            .await;
        let query = AggregateQuery {
            stages: vec![Stage::MatchId(ids[2])],
            sort: None,
            skip: 0,
            limit: 10,
        };
        let page = store.aggregate("products", &query).await.expect("aggregate");
        assert_eq!(names(&page), vec!["c"]);

        let all = AggregateQuery { stages: Vec::new(), ..query };
        let page = store.aggregate("products", &all).await.expect("aggregate");
        assert_eq!(names(&page), vec!["b", "a", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_sets_only_supplied_fields(store: InMemoryDocumentStore) {
        let ids = store
            .seed("products", [doc! { "name": "Milk", "icon": "milk" }])
            .await;
        let matched = store
            .update_one("products", ids[0], doc! { "name": "Oat milk" })
            .await
            .expect("update");
        assert_eq!(matched, 1);

        let doc = store
            .find_one("products", &Filter::Id(ids[0]))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(doc.get_str("name").expect("name"), "Oat milk");
        assert_eq!(doc.get_str("icon").expect("icon"), "milk");
        assert_eq!(
            store
                .update_one("products", RecordId::new(), doc! { "name": "x" })
                .await
                .expect("update"),
            0
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_removed_count(store: InMemoryDocumentStore) {
        let ids = store.seed("products", [doc! { "name": "Milk" }]).await;
        assert_eq!(store.delete_one("products", ids[0]).await.expect("delete"), 1);
        assert_eq!(store.delete_one("products", ids[0]).await.expect("delete"), 0);
        assert_eq!(store.delete_one("missing", ids[0]).await.expect("delete"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_field_value(store: InMemoryDocumentStore) {
        store
            .seed("categories", [doc! { "name": "Dairy" }, doc! { "name": "Bakery" }])
            .await;
        let hit = store
            .find_one("categories", &Filter::field_eq("name", "Bakery"))
            .await
            .expect("find");
        assert!(hit.is_some());
        let miss = store
            .find_one("categories", &Filter::field_eq("name", "Frozen"))
            .await
            .expect("find");
        assert!(miss.is_none());
    }
}
