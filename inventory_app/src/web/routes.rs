// inventory_app/src/web/routes.rs

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, inventory_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Malformed bodies come back as `{"error": ...}` with a 400, like every other validation failure.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}

/// Registers every route of the API. Called from `main.rs` and from the HTTP tests.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .route("/health", web::get().to(health_check_handler))
    // Authentication Routes
    .service(
      web::scope("/api")
        .route("/register", web::post().to(auth_handlers::register_handler))
        .route("/login", web::post().to(auth_handlers::login_handler))
        .route("/logout", web::post().to(auth_handlers::logout_handler)),
    )
    // Inventory Routes (all require a bearer token)
    .service(
      web::scope("/inventory")
        .route("", web::get().to(inventory_handlers::list_inventory_handler))
        .route("", web::post().to(inventory_handlers::create_inventory_handler))
        .route("/{id}", web::put().to(inventory_handlers::update_inventory_handler))
        .route("/{id}", web::delete().to(inventory_handlers::delete_inventory_handler)),
    );
}
