//! Application configuration loaded via OrthoConfig.
//!
//! Values layer from a configuration file, `RECIPEBOOK_*` environment
//! variables and command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8090;
const DEFAULT_DB_NAME: &str = "recipebook";
const DEFAULT_ICONS_DIR: &str = "public/icons";

/// Startup settings for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPEBOOK")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// MongoDB connection string; unset selects the in-memory store.
    pub mongo_url: Option<String>,
    /// Database holding the catalogue collections.
    pub mongo_db_name: Option<String>,
    /// Directory scanned for icon PNGs.
    pub icons_dir: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured database name, falling back to the default.
    pub fn mongo_db_name(&self) -> &str {
        self.mongo_db_name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    /// Return the configured icon directory, falling back to the default.
    pub fn icons_dir(&self) -> &Path {
        self.icons_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_ICONS_DIR))
    }

    /// Resolve host and port into a socket address.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        format!("{}:{}", self.host(), self.port())
            .parse()
            .map_err(|err| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid bind address {}:{}: {err}", self.host(), self.port()),
                )
            })
    }
}
