// server/src/main.rs

use coinshelf_server::config::AppConfig;
use coinshelf_server::state::AppState;
use coinshelf_server::store::{MemoryStore, PgStore, Store};
use coinshelf_server::{build_app, seed};

use actix_web::HttpServer;
use anyhow::Context;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

/// `DATABASE_URL` value that selects the in-memory store.
const MEMORY_DATABASE_URL: &str = "memory://";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting coinshelf server...");

  let app_config = Arc::new(AppConfig::from_env().context("loading configuration")?);
  tracing::debug!(config = ?app_config, "Loaded config details");

  let store: Arc<dyn Store> = if app_config.database_url == MEMORY_DATABASE_URL {
    tracing::warn!("Using the in-memory store; data is lost on exit.");
    Arc::new(MemoryStore::new())
  } else {
    let pg = PgStore::connect(&app_config.database_url, app_config.database_max_connections)
      .await
      .context("connecting to the database")?;
    tracing::info!("Successfully connected to the database.");
    pg.migrate().await.context("running migrations")?;
    Arc::new(pg)
  };

  if app_config.seed_db {
    seed::seed_cryptos(store.as_ref()).await.context("seeding reference cryptos")?;
  }

  let app_state = AppState::new(store, app_config.clone()).context("building token keys")?;

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || build_app(app_state.clone()))
    .bind(&server_address)?
    .run()
    .await?;
  Ok(())
}
