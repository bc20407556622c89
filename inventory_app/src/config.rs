// inventory_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the API on the in-memory store.
  pub database_url: Option<String>,
  pub db_max_connections: u32,
  pub session_ttl_hours: i64,

  // Optional: creates a demo owner on startup
  pub seed_db: bool,
  pub seed_user_email: String,
  pub seed_user_password: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!(
      host = %config.server_host,
      port = config.server_port,
      persistent_store = config.database_url.is_some(),
      "Application configuration loaded successfully."
    );
    Ok(config)
  }

  /// Builds the config from an arbitrary variable source (the process env in production).
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_or = |var_name: &str, default: &str| lookup(var_name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "4000")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let db_max_connections = get_or("DB_MAX_CONNECTIONS", "5")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let session_ttl_hours = get_or("SESSION_TTL_HOURS", "24")
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_HOURS: {}", e)))?;
    if session_ttl_hours <= 0 {
      return Err(AppError::Config("SESSION_TTL_HOURS must be positive".to_string()));
    }

    let seed_db = get_or("SEED_DB", "false")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;
    let seed_user_email = get_or("SEED_USER_EMAIL", "demo@example.com");
    let seed_user_password = get_or("SEED_USER_PASSWORD", "demo-password");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      session_ttl_hours,
      seed_db,
      seed_user_email,
      seed_user_password,
    })
  }
}
