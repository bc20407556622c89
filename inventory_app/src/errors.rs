// inventory_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use inventory_core::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl From<ValidationError> for AppError {
  fn from(err: ValidationError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl AppError {
  pub fn not_found_item(id: impl std::fmt::Display) -> Self {
    AppError::NotFound(format!("Inventory item {} not found.", id))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> actix_web::http::StatusCode {
    use actix_web::http::StatusCode;
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Auth(_) => StatusCode::UNAUTHORIZED,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Client errors are routine; only server-side failures are logged at error level.
    match self {
      AppError::Validation(_) | AppError::Auth(_) | AppError::NotFound(_) => {
        tracing::warn!(application_error = %self, "Responding with client error");
      }
      _ => tracing::error!(application_error = %self, "Responding with error"),
    }
    let status = self.status_code();
    match self {
      AppError::Validation(m) | AppError::Auth(m) | AppError::NotFound(m) => {
        HttpResponse::build(status).json(json!({"error": m}))
      }
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Sqlx(_) | AppError::Migrate(_) => {
        HttpResponse::build(status).json(json!({"error": "Database operation failed"}))
      }
      AppError::Internal(_) => HttpResponse::build(status).json(json!({"error": "An internal error occurred"})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
