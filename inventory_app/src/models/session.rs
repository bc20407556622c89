// inventory_app/src/models/session.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A bearer token issued at login. The token is the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Session {
  pub token: String,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
    now < self.expires_at
  }
}
