//! Products and their category join.
//!
//! Products store the category as `categoryId`. Reads join the category
//! back in as an embedded object, and list rows without an icon inherit
//! the category's.

use std::sync::Arc;

use async_trait::async_trait;
use bson::doc;
use pagination::{ListParams, Page};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::categories::{CATEGORIES, Category};
use super::icons::IconCatalogue;
use super::validation::NameRules;
use crate::domain::pipeline::{Expr, Filter, Stage};
use crate::domain::ports::DocumentStore;
use crate::domain::{
    CollectionQueryService, Document, Error, HookContext, IntoRecordId, Record, RecordHooks,
    RecordId, hex_id,
};

/// Collection holding products.
pub const PRODUCTS: &str = "products";

const NAME: NameRules = NameRules {
    label: "Product",
    missing: "product.name.missing",
    invalid: "product.name.invalid",
    unique: "product.name.unique",
};

/// Product with its category resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Record identifier.
    #[serde(rename = "_id", serialize_with = "hex_id::serialize")]
    #[schema(value_type = String, example = "65f1c0ffee00000000000002")]
    pub id: RecordId,
    /// Display name, unique across products.
    pub name: String,
    /// Icon file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Joined category; absent when the reference dangles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Record for Product {
    type Draft = ProductDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Reference to another record by `_id`.
///
/// Clients usually echo the whole embedded object back; only `_id` is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecordRef {
    /// Hex identifier of the referenced record.
    #[serde(rename = "_id")]
    pub id: String,
}

impl RecordRef {
    /// Reference to `id`.
    pub fn to(id: RecordId) -> Self {
        Self { id: id.to_hex() }
    }
}

/// Create or update payload for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDraft {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Icon file name; must be a known icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Category the product belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RecordRef>,
}

/// Product rules and the category reference rewrite.
#[derive(Debug, Clone)]
pub struct ProductHooks {
    icons: Arc<IconCatalogue>,
}

impl ProductHooks {
    /// Hooks checking icons against `icons`.
    pub fn new(icons: Arc<IconCatalogue>) -> Self {
        Self { icons }
    }
}

fn category_not_found() -> Error {
    Error::validation("product.category.not_found", "Category not found")
}

#[async_trait]
impl RecordHooks<ProductDraft> for ProductHooks {
    async fn validate(&self, item: &ProductDraft, ctx: &HookContext<'_>) -> Result<(), Error> {
        let name = NAME.check(item.name.as_deref())?;
        if item
            .icon
            .as_deref()
            .is_some_and(|icon| !self.icons.contains(icon))
        {
            return Err(Error::validation(
                "product.icon.invalid",
                "Product icon is invalid",
            ));
        }
        NAME.ensure_unique(name, ctx).await?;

        let category = item
            .category
            .as_ref()
            .and_then(|reference| reference.id.as_str().into_record_id())
            .ok_or_else(category_not_found)?;
        ctx.store
            .find_one(CATEGORIES, &Filter::Id(category))
            .await?
            .map(|_| ())
            .ok_or_else(category_not_found)
    }

    async fn parse(&self, item: ProductDraft, _ctx: &HookContext<'_>) -> Result<Document, Error> {
        let mut doc = Document::new();
        if let Some(name) = item.name {
            doc.insert("name", name);
        }
        if let Some(icon) = item.icon {
            doc.insert("icon", icon);
        }
        if let Some(reference) = item.category {
            let id = reference
                .id
                .as_str()
                .into_record_id()
                .ok_or_else(category_not_found)?;
            doc.insert("categoryId", id);
        }
        Ok(doc)
    }
}

/// Stages embedding the category of every product.
pub fn category_join() -> Vec<Stage> {
    vec![
        Stage::lookup(CATEGORIES, "categoryId", "_id", "category"),
        Stage::set("category", Expr::First("category".to_owned())),
        Stage::unset(["categoryId"]),
    ]
}

/// Product service.
pub struct Products {
    inner: CollectionQueryService<Product, ProductHooks>,
}

impl Products {
    /// Product service over `store`, validating icons against `icons`.
    pub fn new(store: Arc<dyn DocumentStore>, icons: Arc<IconCatalogue>) -> Self {
        Self {
            inner: CollectionQueryService::new(store, PRODUCTS)
                .with_pipeline(category_join())
                .with_hooks(ProductHooks::new(icons)),
        }
    }

    /// One page of products; a missing icon falls back to the category's.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Product>, Error> {
        let icon_fallback = [Stage::set("icon", Expr::coalesce(["icon", "category.icon"]))];
        self.inner.list_items(params, &icon_fallback).await
    }

    /// Product by identifier.
    pub async fn read(&self, id: &str) -> Result<Product, Error> {
        self.inner.read_item(id, &[]).await
    }

    /// Validate and store a new product.
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, Error> {
        self.inner.create_item(draft).await
    }

    /// Validate and apply changes to a product.
    pub async fn update(&self, id: &str, draft: ProductDraft) -> Result<Product, Error> {
        self.inner.update_item(id, draft).await
    }

    /// Remove a product. Recipes referencing it keep the dangling id.
    pub async fn delete(&self, id: &str) -> Result<bool, Error> {
        self.inner.delete_item(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::memory::InMemoryDocumentStore;
    use rstest::{fixture, rstest};

    struct Fixture {
        store: Arc<InMemoryDocumentStore>,
        products: Products,
        dairy: RecordId,
    }

    #[fixture]
    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryDocumentStore::new());
        let dairy = store
            .seed(CATEGORIES, [doc! { "name": "Dairy", "icon": "dairy.png" }])
            .await[0];
        let icons = Arc::new(IconCatalogue::from_names(["milk.png", "dairy.png"]));
        Fixture {
            products: Products::new(store.clone(), icons),
            store,
            dairy,
        }
    }

    fn draft(name: &str, category: RecordId) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_owned()),
            icon: None,
            category: Some(RecordRef::to(category)),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_embeds_category_and_stores_foreign_key(#[future] fixture: Fixture) {
        let Fixture { store, products, dairy } = fixture.await;
        let payload = ProductDraft {
            icon: Some("milk.png".to_owned()),
            ..draft("Milk", dairy)
        };

        let created = products.create(payload).await.expect("create");

        assert_eq!(created.name, "Milk");
        assert_eq!(created.icon.as_deref(), Some("milk.png"));
        assert_eq!(created.category.as_ref().map(|c| c.id), Some(dairy));
        let stored = store
            .find_one(PRODUCTS, &Filter::Id(created.id))
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.get_object_id("categoryId").expect("fk"), dairy);
        assert!(!stored.contains_key("category"));

        let read = products.read(&created.id.to_hex()).await.expect("read");
        assert_eq!(read, created);
    }

    #[rstest]
    #[tokio::test]
    async fn list_falls_back_to_category_icon(#[future] fixture: Fixture) {
        let Fixture { products, dairy, .. } = fixture.await;
        products.create(draft("Butter", dairy)).await.expect("create");
        products
            .create(ProductDraft {
                icon: Some("milk.png".to_owned()),
                ..draft("Milk", dairy)
            })
            .await
            .expect("create");

        let page = products.list(&ListParams::default()).await.expect("list");
        let icons: Vec<_> = page.data.iter().map(|p| p.icon.as_deref()).collect();
        assert_eq!(icons, vec![Some("dairy.png"), Some("milk.png")]);

        let butter = products
            .read(&page.data[0].id.to_hex())
            .await
            .expect("read");
        assert_eq!(butter.icon, None);
    }

    #[rstest]
    #[case::missing_name(ProductDraft::default(), "product.name.missing")]
    #[case::short_name(ProductDraft { name: Some("M".into()), ..ProductDraft::default() }, "product.name.invalid")]
    #[case::unknown_icon(
        ProductDraft { name: Some("Milk".into()), icon: Some("rocket.png".into()), ..ProductDraft::default() },
        "product.icon.invalid"
    )]
    #[case::no_category(ProductDraft { name: Some("Milk".into()), ..ProductDraft::default() }, "product.category.not_found")]
    #[case::malformed_category(
        ProductDraft { name: Some("Milk".into()), category: Some(RecordRef { id: "nope".into() }), ..ProductDraft::default() },
        "product.category.not_found"
    )]
    #[case::unknown_category(
        ProductDraft { name: Some("Milk".into()), category: Some(RecordRef::to(RecordId::new())), ..ProductDraft::default() },
        "product.category.not_found"
    )]
    #[tokio::test]
    async fn create_rejects_invalid_payloads(
        #[future] fixture: Fixture,
        #[case] payload: ProductDraft,
        #[case] reason: &str,
    ) {
        let Fixture { store, products, .. } = fixture.await;

        let err = products.create(payload).await.expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.reason(), reason);
        assert_eq!(store.count(PRODUCTS).await.expect("count"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_unique_except_for_self(#[future] fixture: Fixture) {
        let Fixture { products, dairy, .. } = fixture.await;
        let milk = products.create(draft("Milk", dairy)).await.expect("create");
        products.create(draft("Cream", dairy)).await.expect("create");

        let err = products
            .create(draft("Milk", dairy))
            .await
            .expect_err("duplicate");
        assert_eq!(err.reason(), "product.name.unique");

        let renamed = products
            .update(&milk.id.to_hex(), draft("Milk", dairy))
            .await
            .expect("own name");
        assert_eq!(renamed.id, milk.id);

        let err = products
            .update(&milk.id.to_hex(), draft("Cream", dairy))
            .await
            .expect_err("taken");
        assert_eq!(err.reason(), "product.name.unique");
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_category_leaves_products_without_one(#[future] fixture: Fixture) {
        let Fixture { store, products, dairy } = fixture.await;
        let milk = products.create(draft("Milk", dairy)).await.expect("create");
        store.delete_one(CATEGORIES, dairy).await.expect("delete");

        let read = products.read(&milk.id.to_hex()).await.expect("read");
        assert_eq!(read.category, None);
    }
}
