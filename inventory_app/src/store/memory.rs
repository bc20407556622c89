// inventory_app/src/store/memory.rs

//! Process-local store. Used when no `DATABASE_URL` is configured, and by tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::{AccountStore, InventoryStore};
use crate::errors::{AppError, Result};
use crate::models::{InventoryItem, ItemRecord, NewUser, Session, User};

#[derive(Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
  items: HashMap<Uuid, StoredItem>,
  users_by_email: HashMap<String, User>,
  sessions: HashMap<String, Session>,
  // Bumped on every item write; breaks `updated_at` ties in list order.
  write_seq: u64,
}

struct StoredItem {
  item: InventoryItem,
  write_seq: u64,
}

impl Tables {
  fn next_seq(&mut self) -> u64 {
    self.write_seq += 1;
    self.write_seq
  }
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InventoryStore for MemoryStore {
  async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<InventoryItem>> {
    let tables = self.tables.read();
    let mut owned: Vec<&StoredItem> = tables.items.values().filter(|s| s.item.owner_id == owner_id).collect();
    owned.sort_by(|a, b| {
      b.item
        .updated_at
        .cmp(&a.item.updated_at)
        .then_with(|| b.write_seq.cmp(&a.write_seq))
    });
    Ok(owned.into_iter().map(|s| s.item.clone()).collect())
  }

  async fn insert(&self, owner_id: Uuid, record: ItemRecord, now: DateTime<Utc>) -> Result<InventoryItem> {
    let mut tables = self.tables.write();
    let id = Uuid::new_v4();
    let item = InventoryItem::from_record(id, owner_id, record, now, now);
    let write_seq = tables.next_seq();
    tables.items.insert(
      id,
      StoredItem {
        item: item.clone(),
        write_seq,
      },
    );
    debug!(item_id = %id, "Inserted item into memory store.");
    Ok(item)
  }

  async fn update_owned(
    &self,
    owner_id: Uuid,
    id: Uuid,
    record: ItemRecord,
    now: DateTime<Utc>,
  ) -> Result<Option<InventoryItem>> {
    let mut tables = self.tables.write();
    let write_seq = tables.next_seq();
    match tables.items.get_mut(&id) {
      Some(stored) if stored.item.owner_id == owner_id => {
        stored.item.apply_record(record, now);
        stored.write_seq = write_seq;
        Ok(Some(stored.item.clone()))
      }
      _ => Ok(None),
    }
  }

  async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
    let mut tables = self.tables.write();
    let owned = tables.items.get(&id).is_some_and(|s| s.item.owner_id == owner_id);
    if owned {
      tables.items.remove(&id);
    }
    Ok(owned)
  }
}

#[async_trait]
impl AccountStore for MemoryStore {
  async fn insert_user(&self, new_user: NewUser, now: DateTime<Utc>) -> Result<User> {
    let mut tables = self.tables.write();
    if tables.users_by_email.contains_key(&new_user.email) {
      return Err(AppError::Validation("An account with this email already exists.".to_string()));
    }
    let user = User {
      id: Uuid::new_v4(),
      email: new_user.email,
      first_name: new_user.first_name,
      last_name: new_user.last_name,
      phone_number: new_user.phone_number,
      image_url: new_user.image_url,
      password_hash: new_user.password_hash,
      created_at: now,
      updated_at: now,
    };
    tables.users_by_email.insert(user.email.clone(), user.clone());
    Ok(user)
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.tables.read().users_by_email.get(email).cloned())
  }

  async fn insert_session(&self, session: Session) -> Result<()> {
    let mut tables = self.tables.write();
    let now = session.created_at;
    let before = tables.sessions.len();
    tables.sessions.retain(|_, s| s.is_active_at(now));
    let pruned = before - tables.sessions.len();
    if pruned > 0 {
      debug!(pruned, "Dropped expired sessions.");
    }
    tables.sessions.insert(session.token.clone(), session);
    Ok(())
  }

  async fn find_session(&self, token: &str) -> Result<Option<Session>> {
    Ok(self.tables.read().sessions.get(token).cloned())
  }

  async fn delete_session(&self, token: &str) -> Result<bool> {
    Ok(self.tables.write().sessions.remove(token).is_some())
  }
}
