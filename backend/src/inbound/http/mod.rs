//! HTTP inbound adapter exposing REST endpoints.
//!
//! Resource routes live under `/api`; health probes sit at the root.

pub mod categories;
pub mod error;
pub mod health;
pub mod icons;
pub mod listing;
pub mod products;
pub mod recipes;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope with every resource handler.
///
/// Body and query decoding failures are reported in the domain error
/// envelope rather than as plain-text actix errors.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use recipebook::domain::catalogue::IconCatalogue;
/// use recipebook::inbound::http::{configure_api, state::HttpState};
/// use recipebook::outbound::memory::InMemoryDocumentStore;
///
/// let state = HttpState::new(
///     Arc::new(InMemoryDocumentStore::new()),
///     Arc::new(IconCatalogue::default()),
/// );
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
            .service(categories::list_categories)
            .service(categories::create_category)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(products::list_products)
            .service(products::create_product)
            .service(products::get_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(recipes::list_recipes)
            .service(recipes::create_recipe)
            .service(recipes::get_recipe)
            .service(recipes::update_recipe)
            .service(recipes::delete_recipe)
            .service(icons::list_icons),
    );
}

/// Register the health probes.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ready).service(health::live);
}
