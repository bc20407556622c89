// inventory_app/src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{AccountStore, InventoryStore};
use crate::errors::{AppError, Result};
use crate::models::{InventoryItem, ItemRecord, NewUser, Session, StockStatus, User};

const ITEM_COLUMNS: &str =
  "id, owner_id, name, sku, category, stock, price, status, last_updated, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Opens a pool and brings the schema up to date.
  pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await?;
    info!("Successfully connected to the database.");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied.");
    Ok(Self::new(pool))
  }
}

/// Row shape of `inventory_items`; status is stored as its label.
#[derive(Debug, FromRow)]
struct ItemRow {
  id: Uuid,
  owner_id: Uuid,
  name: String,
  sku: String,
  category: String,
  stock: i64,
  price: Decimal,
  status: String,
  last_updated: NaiveDate,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for InventoryItem {
  type Error = AppError;

  fn try_from(row: ItemRow) -> Result<Self> {
    let status = row
      .status
      .parse::<StockStatus>()
      .map_err(|e| AppError::Internal(format!("Corrupt row {}: {}", row.id, e)))?;
    Ok(InventoryItem {
      id: row.id,
      owner_id: row.owner_id,
      name: row.name,
      sku: row.sku,
      category: row.category,
      stock: row.stock,
      price: row.price,
      status,
      last_updated: row.last_updated,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
  move |e| {
    error!(error = %e, "{}", context);
    AppError::Sqlx(e)
  }
}

#[async_trait]
impl InventoryStore for PgStore {
  #[instrument(name = "pg::list_items", skip(self))]
  async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<InventoryItem>> {
    let rows: Vec<ItemRow> = sqlx::query_as(&format!(
      "SELECT {} FROM inventory_items WHERE owner_id = $1 ORDER BY updated_at DESC, write_seq DESC",
      ITEM_COLUMNS
    ))
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await
    .map_err(db_error("Failed to fetch inventory items."))?;

    rows.into_iter().map(InventoryItem::try_from).collect()
  }

  #[instrument(name = "pg::insert_item", skip(self, record, now))]
  async fn insert(&self, owner_id: Uuid, record: ItemRecord, now: DateTime<Utc>) -> Result<InventoryItem> {
    let row: ItemRow = sqlx::query_as(&format!(
      "INSERT INTO inventory_items (id, owner_id, name, sku, category, stock, price, status, last_updated, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&record.name)
    .bind(&record.sku)
    .bind(&record.category)
    .bind(record.stock)
    .bind(record.price)
    .bind(record.status.as_str())
    .bind(record.last_updated)
    .bind(now)
    .fetch_one(&self.pool)
    .await
    .map_err(db_error("Failed to insert inventory item."))?;

    row.try_into()
  }

  #[instrument(name = "pg::update_item", skip(self, record, now))]
  async fn update_owned(
    &self,
    owner_id: Uuid,
    id: Uuid,
    record: ItemRecord,
    now: DateTime<Utc>,
  ) -> Result<Option<InventoryItem>> {
    // Single statement: the owner check and the write are one atomic row update.
    let row: Option<ItemRow> = sqlx::query_as(&format!(
      "UPDATE inventory_items \
       SET name = $3, sku = $4, category = $5, stock = $6, price = $7, status = $8, last_updated = $9, updated_at = $10, \
           write_seq = nextval('inventory_write_seq') \
       WHERE id = $1 AND owner_id = $2 RETURNING {}",
      ITEM_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .bind(&record.name)
    .bind(&record.sku)
    .bind(&record.category)
    .bind(record.stock)
    .bind(record.price)
    .bind(record.status.as_str())
    .bind(record.last_updated)
    .bind(now)
    .fetch_optional(&self.pool)
    .await
    .map_err(db_error("Failed to update inventory item."))?;

    row.map(InventoryItem::try_from).transpose()
  }

  #[instrument(name = "pg::delete_item", skip(self))]
  async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
    let done = sqlx::query("DELETE FROM inventory_items WHERE id = $1 AND owner_id = $2")
      .bind(id)
      .bind(owner_id)
      .execute(&self.pool)
      .await
      .map_err(db_error("Failed to delete inventory item."))?;
    Ok(done.rows_affected() > 0)
  }
}

const USER_COLUMNS: &str =
  "id, email, first_name, last_name, phone_number, image_url, password_hash, created_at, updated_at";

#[async_trait]
impl AccountStore for PgStore {
  #[instrument(name = "pg::insert_user", skip(self, new_user, now), fields(email = %new_user.email))]
  async fn insert_user(&self, new_user: NewUser, now: DateTime<Utc>) -> Result<User> {
    let inserted = sqlx::query_as::<_, User>(&format!(
      "INSERT INTO users (id, email, first_name, last_name, phone_number, image_url, password_hash, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING {}",
      USER_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&new_user.email)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.phone_number)
    .bind(&new_user.image_url)
    .bind(&new_user.password_hash)
    .bind(now)
    .fetch_one(&self.pool)
    .await;

    match inserted {
      Ok(user) => Ok(user),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(AppError::Validation(
        "An account with this email already exists.".to_string(),
      )),
      Err(e) => Err(db_error("Database error while creating user.")(e)),
    }
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
      .bind(email)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_error("Database error while fetching user by email."))
  }

  async fn insert_session(&self, session: Session) -> Result<()> {
    let pruned = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
      .bind(session.created_at)
      .execute(&self.pool)
      .await
      .map_err(db_error("Failed to prune expired sessions."))?;
    if pruned.rows_affected() > 0 {
      debug!(pruned = pruned.rows_affected(), "Dropped expired sessions.");
    }

    sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES ($1, $2, $3, $4)")
      .bind(&session.token)
      .bind(session.user_id)
      .bind(session.created_at)
      .bind(session.expires_at)
      .execute(&self.pool)
      .await
      .map_err(db_error("Failed to store session."))?;
    Ok(())
  }

  async fn find_session(&self, token: &str) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>("SELECT token, user_id, created_at, expires_at FROM sessions WHERE token = $1")
      .bind(token)
      .fetch_optional(&self.pool)
      .await
      .map_err(db_error("Failed to look up session."))
  }

  async fn delete_session(&self, token: &str) -> Result<bool> {
    let done = sqlx::query("DELETE FROM sessions WHERE token = $1")
      .bind(token)
      .execute(&self.pool)
      .await
      .map_err(db_error("Failed to revoke session."))?;
    Ok(done.rows_affected() > 0)
  }
}
