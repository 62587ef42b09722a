//! Recipe and product catalogue backend.
//!
//! A generic collection query service in [`domain`] provides paginated
//! listing, reads, validated writes and deletes over a document store. The
//! catalogue resources wire it to their collections, and [`inbound::http`]
//! exposes them as a REST API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
