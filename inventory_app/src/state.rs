// inventory_app/src/state.rs
use crate::config::AppConfig;
use crate::store::{AccountStore, InventoryStore, MemoryStore, PgStore};
use inventory_core::Clock;
use std::sync::Arc;

/// Everything a request handler may touch. Cheap to clone; all members are `Arc`s.
#[derive(Clone)]
pub struct AppState {
  pub inventory: Arc<dyn InventoryStore>,
  pub accounts: Arc<dyn AccountStore>,
  pub clock: Arc<dyn Clock>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn with_memory_store(config: Arc<AppConfig>, clock: Arc<dyn Clock>) -> Self {
    let store = Arc::new(MemoryStore::new());
    Self {
      inventory: store.clone(),
      accounts: store,
      clock,
      config,
    }
  }

  pub fn with_pg_store(store: PgStore, config: Arc<AppConfig>, clock: Arc<dyn Clock>) -> Self {
    let store = Arc::new(store);
    Self {
      inventory: store.clone(),
      accounts: store,
      clock,
      config,
    }
  }
}
