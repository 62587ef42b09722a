//! Catalogue resources: product categories, products, recipes and icons.
//!
//! Each resource wires a [`CollectionQueryService`](crate::domain::CollectionQueryService)
//! with its collection, join pipeline and hooks.

mod categories;
mod icons;
mod products;
mod recipes;
mod validation;

pub use categories::{CATEGORIES, Categories, Category, CategoryDraft, CategoryHooks, categories};
pub use icons::IconCatalogue;
pub use products::{
    PRODUCTS, Product, ProductDraft, ProductHooks, Products, RecordRef, category_join,
};
pub use recipes::{
    Ingredient, IngredientDraft, Instruction, InstructionDraft, ProductSummary, RECIPES, Recipe,
    RecipeDraft, RecipeHooks, RecipeSummary, Recipes, ingredient_join, summary_projection,
};
pub use validation::MIN_NAME_LEN;
