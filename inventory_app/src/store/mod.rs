// inventory_app/src/store/mod.rs

//! Persistence contract for the API.
//!
//! Handlers and services only see these traits. Every item operation except
//! insert is keyed by `(owner_id, id)`, so a record owned by someone else is
//! indistinguishable from one that doesn't exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{InventoryItem, ItemRecord, NewUser, Session, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait InventoryStore: Send + Sync {
  /// Items of one owner, most recently written first.
  async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<InventoryItem>>;

  /// Persists a new item; the store assigns the id.
  async fn insert(&self, owner_id: Uuid, record: ItemRecord, now: DateTime<Utc>) -> Result<InventoryItem>;

  /// Replaces the mutable fields of `id` if it belongs to `owner_id`. `None` when nothing matched.
  async fn update_owned(
    &self,
    owner_id: Uuid,
    id: Uuid,
    record: ItemRecord,
    now: DateTime<Utc>,
  ) -> Result<Option<InventoryItem>>;

  /// Returns whether a row owned by `owner_id` was removed.
  async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
  /// Fails with `AppError::Validation` if the email is taken.
  async fn insert_user(&self, new_user: NewUser, now: DateTime<Utc>) -> Result<User>;
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  /// Stores `session` and drops every session already expired at its `created_at`.
  async fn insert_session(&self, session: Session) -> Result<()>;
  async fn find_session(&self, token: &str) -> Result<Option<Session>>;
  async fn delete_session(&self, token: &str) -> Result<bool>;
}
