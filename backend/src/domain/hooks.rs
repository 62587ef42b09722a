//! Per-resource validation and persistence hooks.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::ports::DocumentStore;
use crate::domain::{Document, Error, RecordId};

/// Context handed to hooks.
///
/// `id` is set for updates and absent for creates, which is how uniqueness
/// checks exclude the record being edited.
#[derive(Clone, Copy)]
pub struct HookContext<'a> {
    /// Target record on update.
    pub id: Option<RecordId>,
    /// Collection the service writes to.
    pub collection: &'a str,
    /// Store for lookups issued by validation.
    pub store: &'a dyn DocumentStore,
}

impl std::fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("id", &self.id)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

/// Validate and normalise drafts before they reach the store.
///
/// Both methods have defaults: validation accepts everything and parsing
/// encodes the draft as-is.
#[async_trait]
pub trait RecordHooks<D>: Send + Sync
where
    D: Serialize + Send + Sync + 'static,
{
    /// Reject a draft with a validation error.
    async fn validate(&self, _item: &D, _ctx: &HookContext<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Produce the document to persist.
    async fn parse(&self, item: D, _ctx: &HookContext<'_>) -> Result<Document, Error> {
        Ok(bson::to_document(&item)?)
    }
}

/// Hooks with default behaviour only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<D> RecordHooks<D> for NoHooks where D: Serialize + Send + Sync + 'static {}
