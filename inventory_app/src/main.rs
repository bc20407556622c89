// inventory_app/src/main.rs

use inventory_app::services::auth_service;
use inventory_app::store::PgStore;
use inventory_app::web::configure_app_routes;
use inventory_app::{AppConfig, AppState};
use inventory_core::SystemClock;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  // LOG_FORMAT=json for log shippers; human-readable otherwise.
  if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
    builder.json().init();
  } else {
    builder.init();
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  tracing::info!("Starting inventory application server...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  let clock = Arc::new(SystemClock);

  let app_state = match &app_config.database_url {
    Some(database_url) => {
      let store = PgStore::connect(database_url, app_config.db_max_connections)
        .await
        .context("Failed to connect to the database")?;
      AppState::with_pg_store(store, app_config.clone(), clock)
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data will not survive a restart.");
      AppState::with_memory_store(app_config.clone(), clock)
    }
  };

  auth_service::ensure_seed_user(&app_state)
    .await
    .context("Failed to seed the demo user")?;

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
