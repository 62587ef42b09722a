//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable against the in-memory store.

use std::sync::Arc;

use crate::domain::catalogue::{Categories, IconCatalogue, Products, Recipes, categories};
use crate::domain::ports::DocumentStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<Categories>,
    pub products: Arc<Products>,
    pub recipes: Arc<Recipes>,
    pub icons: Arc<IconCatalogue>,
    pub store: Arc<dyn DocumentStore>,
}

impl HttpState {
    /// Wire every catalogue service against one store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipebook::domain::catalogue::IconCatalogue;
    /// use recipebook::inbound::http::state::HttpState;
    /// use recipebook::outbound::memory::InMemoryDocumentStore;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryDocumentStore::new()),
    ///     Arc::new(IconCatalogue::from_names(["milk.png"])),
    /// );
    /// assert!(state.icons.contains("milk.png"));
    /// ```
    pub fn new(store: Arc<dyn DocumentStore>, icons: Arc<IconCatalogue>) -> Self {
        Self {
            categories: Arc::new(categories(Arc::clone(&store))),
            products: Arc::new(Products::new(Arc::clone(&store), Arc::clone(&icons))),
            recipes: Arc::new(Recipes::new(Arc::clone(&store))),
            icons,
            store,
        }
    }
}
