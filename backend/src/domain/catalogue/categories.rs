//! Product categories.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::NameRules;
use crate::domain::ports::DocumentStore;
use crate::domain::{
    CollectionQueryService, Error, HookContext, Record, RecordHooks, RecordId, hex_id,
};

/// Collection holding categories.
pub const CATEGORIES: &str = "categories";

const NAME: NameRules = NameRules {
    label: "Category",
    missing: "category.name.missing",
    invalid: "category.name.invalid",
    unique: "category.name.unique",
};

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Record identifier.
    #[serde(rename = "_id", serialize_with = "hex_id::serialize")]
    #[schema(value_type = String, example = "65f1c0ffee00000000000001")]
    pub id: RecordId,
    /// Display name, unique across categories.
    pub name: String,
    /// Icon file name shared by products without their own icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Record for Category {
    type Draft = CategoryDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Create or update payload for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryDraft {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Icon file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Name rules for categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryHooks;

#[async_trait]
impl RecordHooks<CategoryDraft> for CategoryHooks {
    async fn validate(&self, item: &CategoryDraft, ctx: &HookContext<'_>) -> Result<(), Error> {
        let name = NAME.check(item.name.as_deref())?;
        NAME.ensure_unique(name, ctx).await
    }
}

/// Category service.
pub type Categories = CollectionQueryService<Category, CategoryHooks>;

/// Category service over `store`.
pub fn categories(store: Arc<dyn DocumentStore>) -> Categories {
    CollectionQueryService::new(store, CATEGORIES).with_hooks(CategoryHooks)
}
