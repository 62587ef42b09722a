//! Backend entry-point: selects the document store, loads icons and serves
//! the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipebook::domain::catalogue::IconCatalogue;
use recipebook::domain::ports::DocumentStore;
use recipebook::inbound::http::health::HealthState;
use recipebook::outbound::memory::InMemoryDocumentStore;
use recipebook::outbound::mongodb::MongoDocumentStore;
use recipebook::settings::AppSettings;
use server::{ServerConfig, create_server};

async fn select_store(settings: &AppSettings) -> std::io::Result<Arc<dyn DocumentStore>> {
    match settings.mongo_url.as_deref() {
        Some(url) => {
            let store = MongoDocumentStore::connect(url, settings.mongo_db_name())
                .await
                .map_err(|err| std::io::Error::other(format!("connect to MongoDB: {err}")))?;
            info!(database = settings.mongo_db_name(), "using MongoDB document store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("no mongo_url configured; records live in memory and vanish on exit");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("load configuration: {err}")))?;
    let bind_addr = settings.bind_addr()?;
    let store = select_store(&settings).await?;
    let icons = Arc::new(IconCatalogue::load_or_empty(settings.icons_dir()));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, store, icons, settings.icons_dir().to_path_buf());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "server listening");
    server.await
}
