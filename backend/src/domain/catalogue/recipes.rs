//! Recipes with ingredient products resolved on read.
//!
//! Ingredients are stored as `{ amount, ingredientId }`. Single reads join
//! the referenced products back in; list rows carry only an ingredient count.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, doc};
use pagination::{ListParams, Page};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::products::{PRODUCTS, RecordRef};
use super::validation::is_blank;
use crate::domain::pipeline::{Expr, Stage};
use crate::domain::ports::DocumentStore;
use crate::domain::{
    CollectionQueryService, Document, Error, HookContext, IntoRecordId, Record, RecordHooks,
    RecordId, hex_id,
};

/// Collection holding recipes.
pub const RECIPES: &str = "recipes";

/// Product fields shown inside a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    /// Record identifier.
    #[serde(rename = "_id", serialize_with = "hex_id::serialize")]
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Product name.
    pub name: String,
    /// Icon file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One ingredient line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    /// Free-form quantity, for example `200g`.
    pub amount: String,
    /// Referenced product; absent once the product is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<ProductSummary>,
}

/// One preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Instruction {
    /// Step heading.
    pub title: String,
    /// Step text.
    pub description: String,
}

/// Full recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    /// Record identifier.
    #[serde(rename = "_id", serialize_with = "hex_id::serialize")]
    #[schema(value_type = String, example = "65f1c0ffee00000000000003")]
    pub id: RecordId,
    /// Recipe name.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of people served.
    pub amount: i64,
    /// Preparation time, free-form.
    pub duration: String,
    /// Ingredient lines in order.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Steps in order.
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl Record for Recipe {
    type Draft = RecipeDraft;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Recipe list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Record identifier.
    #[serde(rename = "_id", serialize_with = "hex_id::serialize")]
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Recipe name.
    pub name: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of people served.
    pub amount: i64,
    /// Preparation time.
    pub duration: String,
    /// Number of ingredient lines.
    pub ingredients_count: u32,
}

/// Ingredient line as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientDraft {
    /// Quantity.
    #[serde(default)]
    pub amount: Option<String>,
    /// Product used.
    #[serde(default)]
    pub ingredient: Option<RecordRef>,
}

/// Step as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InstructionDraft {
    /// Step heading.
    #[serde(default)]
    pub title: Option<String>,
    /// Step text.
    #[serde(default)]
    pub description: Option<String>,
}

/// Create or update payload for a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeDraft {
    /// Recipe name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of people served; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Preparation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// At least one ingredient line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<IngredientDraft>>,
    /// At least one step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<InstructionDraft>>,
}

fn ingredients_invalid() -> Error {
    Error::validation("recipe.ingredients.invalid", "Invalid recipe ingredients")
}

fn ingredient_product(line: &IngredientDraft) -> Option<RecordId> {
    line.ingredient
        .as_ref()
        .and_then(|reference| reference.id.as_str().into_record_id())
}

/// Recipe rules and the ingredient reference rewrite.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeHooks;

#[async_trait]
impl RecordHooks<RecipeDraft> for RecipeHooks {
    async fn validate(&self, item: &RecipeDraft, _ctx: &HookContext<'_>) -> Result<(), Error> {
        if is_blank(item.name.as_deref()) {
            return Err(Error::validation(
                "recipe.name.missing",
                "Recipe name is missing",
            ));
        }
        if item.amount.is_none_or(|amount| amount <= 0) {
            return Err(Error::validation(
                "recipe.amount.invalid",
                "Invalid recipe amount",
            ));
        }
        if is_blank(item.duration.as_deref()) {
            return Err(Error::validation(
                "recipe.duration.missing",
                "Recipe duration is missing",
            ));
        }

        let ingredients = item.ingredients.as_deref().unwrap_or_default();
        if ingredients.is_empty() {
            return Err(Error::validation(
                "recipe.ingredients.missing",
                "Recipe ingredients are missing",
            ));
        }
        if ingredients
            .iter()
            .any(|line| is_blank(line.amount.as_deref()) || ingredient_product(line).is_none())
        {
            return Err(ingredients_invalid());
        }

        let instructions = item.instructions.as_deref().unwrap_or_default();
        if instructions.is_empty() {
            return Err(Error::validation(
                "recipe.instructions.missing",
                "Recipe instructions are missing",
            ));
        }
        if instructions
            .iter()
            .any(|step| is_blank(step.title.as_deref()) || is_blank(step.description.as_deref()))
        {
            return Err(Error::validation(
                "recipe.instructions.invalid",
                "Invalid recipe instructions",
            ));
        }
        Ok(())
    }

    async fn parse(&self, item: RecipeDraft, _ctx: &HookContext<'_>) -> Result<Document, Error> {
        let mut doc = Document::new();
        if let Some(name) = item.name {
            doc.insert("name", name);
        }
        if let Some(description) = item.description {
            doc.insert("description", description);
        }
        if let Some(amount) = item.amount {
            doc.insert("amount", amount);
        }
        if let Some(duration) = item.duration {
            doc.insert("duration", duration);
        }
        if let Some(lines) = item.ingredients {
            let stored = lines
                .iter()
                .map(|line| {
                    let product = ingredient_product(line).ok_or_else(ingredients_invalid)?;
                    Ok(Bson::Document(doc! {
                        "amount": line.amount.clone().unwrap_or_default(),
                        "ingredientId": product,
                    }))
                })
                .collect::<Result<Vec<_>, Error>>()?;
            doc.insert("ingredients", stored);
        }
        if let Some(steps) = item.instructions {
            let stored: Vec<Bson> = steps
                .into_iter()
                .map(|step| {
                    Bson::Document(doc! {
                        "title": step.title.unwrap_or_default(),
                        "description": step.description.unwrap_or_default(),
                    })
                })
                .collect();
            doc.insert("instructions", stored);
        }
        Ok(doc)
    }
}

/// Stages replacing ingredient lines' `ingredientId` with the product.
pub fn ingredient_join() -> Vec<Stage> {
    vec![
        Stage::lookup(PRODUCTS, "ingredients.ingredientId", "_id", "products"),
        Stage::set(
            "ingredients",
            Expr::AttachMatches {
                array: "ingredients".to_owned(),
                key: "ingredientId".to_owned(),
                source: "products".to_owned(),
                as_field: "ingredient".to_owned(),
            },
        ),
        Stage::unset(["products", "ingredients.ingredientId"]),
    ]
}

/// Stages reducing a recipe to its list row.
pub fn summary_projection() -> Vec<Stage> {
    vec![
        Stage::set("ingredientsCount", Expr::Size("ingredients".to_owned())),
        Stage::unset(["ingredients", "instructions"]),
    ]
}

/// Recipe service.
pub struct Recipes {
    inner: CollectionQueryService<Recipe, RecipeHooks>,
}

impl Recipes {
    /// Recipe service over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: CollectionQueryService::new(store, RECIPES).with_hooks(RecipeHooks),
        }
    }

    /// One page of recipe summaries.
    pub async fn list(&self, params: &ListParams) -> Result<Page<RecipeSummary>, Error> {
        self.inner
            .list_documents(params, &summary_projection())
            .await?
            .try_map(|doc| bson::from_document(doc).map_err(Error::from))
    }

    /// Recipe with ingredient products resolved.
    pub async fn read(&self, id: impl IntoRecordId) -> Result<Recipe, Error> {
        self.inner.read_item(id, &ingredient_join()).await
    }

    /// Validate and store a new recipe.
    pub async fn create(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        let created = self.inner.create_item(draft).await?;
        self.read(created.id).await
    }

    /// Validate and apply changes to a recipe.
    pub async fn update(&self, id: &str, draft: RecipeDraft) -> Result<Recipe, Error> {
        let updated = self.inner.update_item(id, draft).await?;
        self.read(updated.id).await
    }

    /// Remove a recipe.
    pub async fn delete(&self, id: &str) -> Result<bool, Error> {
        self.inner.delete_item(id).await
    }
}
