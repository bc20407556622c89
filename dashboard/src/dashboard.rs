// dashboard/src/dashboard.rs

//! In-memory mirror of the signed-in owner's inventory.
//!
//! The mirror only ever holds what the server returned. Optimistic status is
//! computed for display from the form, but after a successful write the
//! server's item replaces whatever the dashboard guessed.

use inventory_core::{InventoryItem, StockStatus};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::InventoryApi;
use crate::error::{ClientError, DashboardError};
use crate::form::ItemForm;
use crate::session::SessionState;

/// Figures for the dashboard's stat cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySummary {
  pub total_items: usize,
  pub in_stock: usize,
  pub low_stock: usize,
  pub out_of_stock: usize,
  pub total_units: i64,
  pub total_value: Decimal,
}

pub struct Dashboard<A: InventoryApi> {
  api: A,
  session: SessionState,
  items: Vec<InventoryItem>,
  search: String,
}

impl<A: InventoryApi> Dashboard<A> {
  pub fn new(api: A) -> Self {
    Self::with_session(api, SessionState::default())
  }

  /// Resumes with a session remembered from earlier.
  pub fn with_session(api: A, session: SessionState) -> Self {
    Self {
      api,
      session,
      items: Vec::new(),
      search: String::new(),
    }
  }

  pub fn session(&self) -> &SessionState {
    &self.session
  }

  /// Every mirrored item, most recently written first.
  pub fn items(&self) -> &[InventoryItem] {
    &self.items
  }

  pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), DashboardError> {
    let login = self.api.login(email, password).await.map_err(|e| match e {
      ClientError::Unauthorized => DashboardError::Rejected("Invalid credentials".to_string()),
      other => self.classify(other),
    })?;
    self.session.login(login.token, login.user_id);
    info!(user_id = %login.user_id, "Signed in.");
    self.refresh().await
  }

  /// Ends the session locally regardless of whether the server call succeeds.
  pub async fn sign_out(&mut self) {
    if let Some(token) = self.session.token().map(str::to_string) {
      if let Err(e) = self.api.logout(&token).await {
        warn!(error = %e, "Server-side logout failed; clearing local session anyway.");
      }
    }
    self.clear_local_state();
  }

  pub async fn refresh(&mut self) -> Result<(), DashboardError> {
    let token = self.token()?;
    let result = self.api.list(&token).await;
    self.items = self.settle(result)?;
    Ok(())
  }

  pub fn set_search(&mut self, query: impl Into<String>) {
    self.search = query.into();
  }

  /// Items matching the search box: case-insensitive substring over name, SKU and category.
  pub fn visible_items(&self) -> Vec<&InventoryItem> {
    let needle = self.search.trim().to_lowercase();
    if needle.is_empty() {
      return self.items.iter().collect();
    }
    self
      .items
      .iter()
      .filter(|item| {
        [&item.name, &item.sku, &item.category]
          .iter()
          .any(|field| field.to_lowercase().contains(&needle))
      })
      .collect()
  }

  pub fn preview_status(&self, form: &ItemForm) -> StockStatus {
    form.preview_status()
  }

  pub async fn submit_new(&mut self, form: &ItemForm) -> Result<&InventoryItem, DashboardError> {
    let token = self.token()?;
    let result = self.api.create(&token, &form.to_draft()).await;
    let created = self.settle(result)?;
    self.items.insert(0, created);
    Ok(&self.items[0])
  }

  pub async fn submit_edit(&mut self, id: Uuid, form: &ItemForm) -> Result<&InventoryItem, DashboardError> {
    let token = self.token()?;
    let result = self.api.update(&token, id, &form.to_draft()).await;
    let updated = match self.settle(result) {
      Ok(item) => item,
      Err(e) => {
        self.forget_if_missing(id, &e);
        return Err(e);
      }
    };
    self.items.retain(|item| item.id != id);
    self.items.insert(0, updated);
    Ok(&self.items[0])
  }

  pub async fn remove(&mut self, id: Uuid) -> Result<(), DashboardError> {
    let token = self.token()?;
    let result = self.api.delete(&token, id).await;
    match self.settle(result) {
      Ok(()) => {
        self.items.retain(|item| item.id != id);
        Ok(())
      }
      Err(e) => {
        self.forget_if_missing(id, &e);
        Err(e)
      }
    }
  }

  /// Totals saturate at `i64::MAX` units and `Decimal::MAX` value rather than overflowing.
  pub fn summary(&self) -> InventorySummary {
    self.items.iter().fold(InventorySummary::default(), |mut acc, item| {
      acc.total_items += 1;
      match item.status {
        StockStatus::InStock => acc.in_stock += 1,
        StockStatus::LowStock => acc.low_stock += 1,
        StockStatus::OutOfStock => acc.out_of_stock += 1,
      }
      acc.total_units = acc.total_units.saturating_add(item.stock);
      acc.total_value = item
        .price
        .checked_mul(Decimal::from(item.stock))
        .and_then(|line| acc.total_value.checked_add(line))
        .unwrap_or(Decimal::MAX);
      acc
    })
  }

  fn token(&self) -> Result<String, DashboardError> {
    self.session.token().map(str::to_string).ok_or(DashboardError::NotSignedIn)
  }

  fn clear_local_state(&mut self) {
    self.session.logout();
    self.items.clear();
  }

  /// Converts an API result, dropping the session on a 401.
  fn settle<T>(&mut self, result: Result<T, ClientError>) -> Result<T, DashboardError> {
    result.map_err(|e| {
      if matches!(e, ClientError::Unauthorized) {
        warn!("Server rejected the session; signing out locally.");
        self.clear_local_state();
      }
      self.classify(e)
    })
  }

  // An item the server no longer has (or never let us own) shouldn't stay on screen.
  fn forget_if_missing(&mut self, id: Uuid, err: &DashboardError) {
    if matches!(err, DashboardError::NotFound(_)) {
      self.items.retain(|item| item.id != id);
    }
  }

  fn classify(&self, err: ClientError) -> DashboardError {
    match err {
      ClientError::Unauthorized => DashboardError::SessionExpired,
      ClientError::NotFound(msg) => DashboardError::NotFound(msg),
      ClientError::Validation(msg) => DashboardError::Rejected(msg),
      other => DashboardError::Api(other),
    }
  }
}
