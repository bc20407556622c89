// inventory_app/src/services/inventory_service.rs

//! The four owner-scoped inventory operations.
//!
//! Writes always go: validate draft -> derive status/lastUpdated from the
//! injected clock -> persist. The client never gets to set a derived field.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{InventoryItem, ItemDraft};
use crate::state::AppState;
use inventory_core::derive_record;

#[instrument(name = "inventory_service::list", skip(state))]
pub async fn list_items(state: &AppState, owner_id: Uuid) -> Result<Vec<InventoryItem>> {
  let items = state.inventory.list_for_owner(owner_id).await?;
  info!("Fetched {} inventory items.", items.len());
  Ok(items)
}

#[instrument(name = "inventory_service::create", skip(state, draft))]
pub async fn create_item(state: &AppState, owner_id: Uuid, draft: &ItemDraft) -> Result<InventoryItem> {
  let validated = draft.validate().map_err(|e| {
    warn!(field = e.field(), "Rejected item draft on create.");
    AppError::from(e)
  })?;
  let record = derive_record(validated, state.clock.as_ref());

  let item = state.inventory.insert(owner_id, record, state.clock.now()).await?;
  info!(item_id = %item.id, status = %item.status, "Inventory item created.");
  Ok(item)
}

#[instrument(name = "inventory_service::update", skip(state, draft))]
pub async fn update_item(state: &AppState, owner_id: Uuid, id: Uuid, draft: &ItemDraft) -> Result<InventoryItem> {
  let validated = draft.validate().map_err(|e| {
    warn!(field = e.field(), "Rejected item draft on update.");
    AppError::from(e)
  })?;
  let record = derive_record(validated, state.clock.as_ref());

  match state.inventory.update_owned(owner_id, id, record, state.clock.now()).await? {
    Some(item) => {
      info!(status = %item.status, "Inventory item updated.");
      Ok(item)
    }
    None => {
      warn!("Update target missing or owned by another user.");
      Err(AppError::not_found_item(id))
    }
  }
}

#[instrument(name = "inventory_service::delete", skip(state))]
pub async fn delete_item(state: &AppState, owner_id: Uuid, id: Uuid) -> Result<()> {
  if state.inventory.delete_owned(owner_id, id).await? {
    info!("Inventory item deleted.");
    Ok(())
  } else {
    warn!("Delete target missing or owned by another user.");
    Err(AppError::not_found_item(id))
  }
}
