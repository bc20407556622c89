// inventory_app/src/web/handlers/inventory_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ItemDraft;
use crate::services::inventory_service;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedOwner;

// A malformed id can't name an item the caller owns, so it is reported the
// same way as an id that doesn't exist.
fn parse_item_id(raw: &str) -> Result<Uuid, AppError> {
  Uuid::parse_str(raw).map_err(|_| AppError::not_found_item(raw))
}

#[instrument(name = "handler::list_inventory", skip(app_state, owner), fields(owner_id = %owner.owner_id))]
pub async fn list_inventory_handler(
  app_state: web::Data<AppState>,
  owner: AuthenticatedOwner,
) -> Result<HttpResponse, AppError> {
  let items = inventory_service::list_items(&app_state, owner.owner_id).await?;
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::create_inventory", skip(app_state, owner, draft), fields(owner_id = %owner.owner_id))]
pub async fn create_inventory_handler(
  app_state: web::Data<AppState>,
  owner: AuthenticatedOwner,
  draft: web::Json<ItemDraft>,
) -> Result<HttpResponse, AppError> {
  let item = inventory_service::create_item(&app_state, owner.owner_id, &draft).await?;
  Ok(HttpResponse::Created().json(item))
}

#[instrument(
  name = "handler::update_inventory",
  skip(app_state, owner, path, draft),
  fields(owner_id = %owner.owner_id, item_id = %path.as_str())
)]
pub async fn update_inventory_handler(
  app_state: web::Data<AppState>,
  owner: AuthenticatedOwner,
  path: web::Path<String>,
  draft: web::Json<ItemDraft>,
) -> Result<HttpResponse, AppError> {
  let item_id = parse_item_id(&path)?;
  let item = inventory_service::update_item(&app_state, owner.owner_id, item_id, &draft).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(
  name = "handler::delete_inventory",
  skip(app_state, owner, path),
  fields(owner_id = %owner.owner_id, item_id = %path.as_str())
)]
pub async fn delete_inventory_handler(
  app_state: web::Data<AppState>,
  owner: AuthenticatedOwner,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let item_id = parse_item_id(&path)?;
  inventory_service::delete_item(&app_state, owner.owner_id, item_id).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Item deleted",
      "id": item_id,
  })))
}
