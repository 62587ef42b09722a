//! Generic CRUD and paginated listing over one collection.
//!
//! [`CollectionQueryService`] is parameterised by the read model it decodes
//! and by the hooks guarding writes. Resources configure it with a base
//! pipeline that every read runs through; callers may append extra stages
//! per request.

use std::marker::PhantomData;
use std::num::NonZeroU64;
use std::sync::Arc;

use pagination::{ListParams, Page, PageMeta};
use tracing::{debug, info, warn};

use crate::domain::hooks::{HookContext, NoHooks, RecordHooks};
use crate::domain::pipeline::{AggregateQuery, Filter, SortSpec, Stage};
use crate::domain::ports::DocumentStore;
use crate::domain::{Document, Error, IntoRecordId, Record, RecordId};

/// Query service bound to a single collection.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use pagination::ListParams;
/// use recipebook::domain::catalogue::Category;
/// use recipebook::domain::CollectionQueryService;
/// use recipebook::outbound::memory::InMemoryDocumentStore;
///
/// # async fn demo() -> Result<(), recipebook::domain::Error> {
/// let store = Arc::new(InMemoryDocumentStore::default());
/// let service = CollectionQueryService::<Category>::new(store, "categories");
/// let page = service.list_items(&ListParams::default(), &[]).await?;
/// assert_eq!(page.meta.total_count, 0);
/// # Ok(())
/// # }
/// ```
pub struct CollectionQueryService<R, H = NoHooks> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    pipeline: Vec<Stage>,
    hooks: H,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> CollectionQueryService<R, NoHooks> {
    /// Service with an empty pipeline and no-op hooks.
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            pipeline: Vec::new(),
            hooks: NoHooks,
            _record: PhantomData,
        }
    }
}

impl<R, H> CollectionQueryService<R, H>
where
    R: Record,
    H: RecordHooks<R::Draft>,
{
    /// Replace the base pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, stages: Vec<Stage>) -> Self {
        self.pipeline = stages;
        self
    }

    /// Replace the hooks.
    pub fn with_hooks<H2>(self, hooks: H2) -> CollectionQueryService<R, H2>
    where
        H2: RecordHooks<R::Draft>,
    {
        CollectionQueryService {
            store: self.store,
            collection: self.collection,
            pipeline: self.pipeline,
            hooks,
            _record: PhantomData,
        }
    }

    /// One page of enriched documents.
    ///
    /// `meta.total_count` counts the whole collection, independent of the
    /// pipeline and of `extra` stages.
    pub async fn list_documents(
        &self,
        params: &ListParams,
        extra: &[Stage],
    ) -> Result<Page<Document>, Error> {
        let total_count = self.store.count(&self.collection).await?;
        let meta = PageMeta::for_total(total_count, params.per_page());

        let query = AggregateQuery {
            stages: self.pipeline.iter().chain(extra).cloned().collect(),
            sort: params.sort_by().map(|field| SortSpec {
                field: field.to_owned(),
                direction: params.order(),
            }),
            skip: params.skip(),
            limit: params.limit(),
        };
        let data = self.store.aggregate(&self.collection, &query).await?;
        debug!(
            collection = %self.collection,
            page = params.page().get(),
            returned = data.len(),
            total_count,
            "listed documents"
        );
        Ok(Page::new(data, meta))
    }

    /// One page of decoded records.
    pub async fn list_items(&self, params: &ListParams, extra: &[Stage]) -> Result<Page<R>, Error> {
        self.list_documents(params, extra)
            .await?
            .try_map(|doc| bson::from_document(doc).map_err(Error::from))
    }

    /// Enriched document for `id`.
    pub async fn read_document(
        &self,
        id: impl IntoRecordId,
        extra: &[Stage],
    ) -> Result<Document, Error> {
        let id = id.into_record_id().ok_or_else(Error::item_not_found)?;
        let stages: Vec<Stage> = std::iter::once(Stage::MatchId(id))
            .chain(extra.iter().cloned())
            .collect();
        let params = ListParams::default().with_per_page(NonZeroU64::MIN);
        self.list_documents(&params, &stages)
            .await?
            .data
            .into_iter()
            .next()
            .ok_or_else(Error::item_not_found)
    }

    /// Decoded record for `id`.
    pub async fn read_item(&self, id: impl IntoRecordId, extra: &[Stage]) -> Result<R, Error> {
        let doc = self.read_document(id, extra).await?;
        Ok(bson::from_document(doc)?)
    }

    /// Validate, parse and insert a draft, then return the stored record.
    pub async fn create_item(&self, draft: R::Draft) -> Result<R, Error> {
        let ctx = self.context(None);
        self.hooks.validate(&draft, &ctx).await?;
        let mut doc = self.hooks.parse(draft, &ctx).await?;
        doc.remove("_id");

        let id = self.store.insert_one(&self.collection, doc).await?;
        info!(collection = %self.collection, %id, "record created");
        self.read_item(id, &[]).await
    }

    /// Apply the supplied fields of a draft to an existing record.
    ///
    /// Fields absent from the parsed document are left untouched.
    pub async fn update_item(&self, id: impl IntoRecordId, draft: R::Draft) -> Result<R, Error> {
        let id = id.into_record_id().ok_or_else(Error::item_not_found)?;
        self.item_exists(id).await?;

        let ctx = self.context(Some(id));
        self.hooks.validate(&draft, &ctx).await?;
        let mut fields = self.hooks.parse(draft, &ctx).await?;
        fields.remove("_id");

        if fields.is_empty() {
            debug!(collection = %self.collection, %id, "update carries no fields");
        } else {
            let matched = self.store.update_one(&self.collection, id, fields).await?;
            if matched == 0 {
                warn!(
                    collection = %self.collection,
                    %id,
                    "record vanished between existence check and update"
                );
            } else {
                info!(collection = %self.collection, %id, "record updated");
            }
        }
        self.read_item(id, &[]).await
    }

    /// Remove a record. A second delete of the same id is a lookup miss.
    pub async fn delete_item(&self, id: impl IntoRecordId) -> Result<bool, Error> {
        let id = id.into_record_id().ok_or_else(Error::item_not_found)?;
        let deleted = self.store.delete_one(&self.collection, id).await?;
        if deleted == 0 {
            return Err(Error::item_not_found());
        }
        info!(collection = %self.collection, %id, "record deleted");
        Ok(true)
    }

    /// Succeed when a record with `id` exists.
    pub async fn item_exists(&self, id: impl IntoRecordId) -> Result<bool, Error> {
        let id = id.into_record_id().ok_or_else(Error::item_not_found)?;
        self.store
            .find_one(&self.collection, &Filter::Id(id))
            .await?
            .map(|_| true)
            .ok_or_else(Error::item_not_found)
    }

    fn context(&self, id: Option<RecordId>) -> HookContext<'_> {
        HookContext {
            id,
            collection: self.collection.as_str(),
            store: self.store.as_ref(),
        }
    }
}
