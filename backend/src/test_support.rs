//! Test utilities for the recipebook crate.
//!
//! Shared helpers for integration tests (in `tests/`): icon directories on
//! disk and a catalogue seeded into the in-memory store. Only compiled with
//! the `test-support` feature.

pub mod icons {
    //! Icon directories built through `cap_std`.

    use std::io;

    use cap_std::{ambient_authority, fs::Dir};
    use tempfile::TempDir;

    /// Create a temporary directory holding one empty file per name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipebook::domain::catalogue::IconCatalogue;
    /// use recipebook::test_support::icons::icon_dir;
    ///
    /// let dir = icon_dir(["milk.png", "notes.txt"])?;
    /// let icons = IconCatalogue::load(dir.path())?;
    /// assert!(icons.contains("milk.png"));
    /// assert!(!icons.contains("notes.txt"));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn icon_dir<'a>(names: impl IntoIterator<Item = &'a str>) -> io::Result<TempDir> {
        let temp = tempfile::tempdir()?;
        let directory = Dir::open_ambient_dir(temp.path(), ambient_authority())?;
        for name in names {
            directory.write(name, b"")?;
        }
        Ok(temp)
    }
}

pub mod catalogue {
    //! A small catalogue seeded directly into the in-memory store.

    use std::sync::Arc;

    use bson::doc;

    use crate::domain::RecordId;
    use crate::domain::catalogue::{CATEGORIES, IconCatalogue, PRODUCTS, RECIPES};
    use crate::inbound::http::state::HttpState;
    use crate::outbound::memory::InMemoryDocumentStore;

    /// Icon names known to [`SeededCatalogue`].
    pub const ICONS: [&str; 4] = ["bread.png", "cheese.png", "flour.png", "milk.png"];

    /// Identifiers of the seeded records.
    pub struct SeededCatalogue {
        pub store: Arc<InMemoryDocumentStore>,
        pub state: HttpState,
        pub dairy: RecordId,
        pub bakery: RecordId,
        pub milk: RecordId,
        pub cheese: RecordId,
        pub bread: RecordId,
        pub pancakes: RecordId,
    }

    /// Seed two categories, three products and one recipe.
    ///
    /// `bread` carries no icon of its own, so list rows inherit the bakery
    /// icon.
    pub async fn seeded_catalogue() -> SeededCatalogue {
        let store = Arc::new(InMemoryDocumentStore::new());
        let category_ids = store
            .seed(
                CATEGORIES,
                [
                    doc! { "name": "Dairy", "icon": "milk.png" },
                    doc! { "name": "Bakery", "icon": "bread.png" },
                ],
            )
            .await;
        let [dairy, bakery] = [category_ids[0], category_ids[1]];

        let product_ids = store
            .seed(
                PRODUCTS,
                [
                    doc! { "name": "Milk", "icon": "milk.png", "categoryId": dairy },
                    doc! { "name": "Cheese", "icon": "cheese.png", "categoryId": dairy },
                    doc! { "name": "Bread", "categoryId": bakery },
                ],
            )
            .await;
        let [milk, cheese, bread] = [product_ids[0], product_ids[1], product_ids[2]];

        let recipe_ids = store
            .seed(
                RECIPES,
                [doc! {
                    "name": "Pancakes",
                    "description": "Sunday breakfast",
                    "amount": 4_i64,
                    "duration": "20 min",
                    "ingredients": [
                        { "amount": "500ml", "ingredientId": milk },
                        { "amount": "2 slices", "ingredientId": bread },
                    ],
                    "instructions": [
                        { "title": "Mix", "description": "Whisk everything" },
                        { "title": "Fry", "description": "Both sides" },
                    ],
                }],
            )
            .await;

        let state = HttpState::new(
            store.clone(),
            Arc::new(IconCatalogue::from_names(ICONS)),
        );
        SeededCatalogue {
            store,
            state,
            dairy,
            bakery,
            milk,
            cheese,
            bread,
            pancakes: recipe_ids[0],
        }
    }
}
