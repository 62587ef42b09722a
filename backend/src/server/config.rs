//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use recipebook::domain::catalogue::IconCatalogue;
use recipebook::domain::ports::DocumentStore;

/// Resolved dependencies for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) icons: Arc<IconCatalogue>,
    pub(crate) icons_dir: PathBuf,
}

impl ServerConfig {
    /// Construct a server configuration around an already selected store.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        store: Arc<dyn DocumentStore>,
        icons: Arc<IconCatalogue>,
        icons_dir: PathBuf,
    ) -> Self {
        Self {
            bind_addr,
            store,
            icons,
            icons_dir,
        }
    }
}
