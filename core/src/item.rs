// core/src/item.rs

//! Inventory item shapes shared by the API and the dashboard.
//!
//! - [`ItemDraft`] is what a client sends: loosely typed, straight off a form.
//! - [`ValidatedDraft`] is a draft after coercion and validation.
//! - [`ItemRecord`] adds the server-derived fields (`status`, `last_updated`).
//! - [`InventoryItem`] is the stored, identified record returned to clients.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::status::{compute_status, StockStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub name: String,
  pub sku: String,
  pub category: String,
  pub stock: i64,
  /// Sent as a JSON number. Validated prices carry at most 14 significant
  /// digits, which an `f64` round-trips exactly.
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub status: StockStatus,
  pub last_updated: NaiveDate,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
  pub fn from_record(
    id: Uuid,
    owner_id: Uuid,
    record: ItemRecord,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      owner_id,
      name: record.name,
      sku: record.sku,
      category: record.category,
      stock: record.stock,
      price: record.price,
      status: record.status,
      last_updated: record.last_updated,
      created_at,
      updated_at,
    }
  }

  /// Replaces every mutable field with the record's values. Identity and `created_at` stay.
  pub fn apply_record(&mut self, record: ItemRecord, updated_at: DateTime<Utc>) {
    self.name = record.name;
    self.sku = record.sku;
    self.category = record.category;
    self.stock = record.stock;
    self.price = record.price;
    self.status = record.status;
    self.last_updated = record.last_updated;
    self.updated_at = updated_at;
  }
}

/// Client-supplied fields for create and update.
///
/// Fields stay as raw JSON so that numeric strings from HTML forms can be
/// coerced, and so a missing field is reported as such instead of as a parse error.
/// Anything else in the body (`status`, `ownerId`, ...) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
  #[serde(default)]
  pub name: Value,
  #[serde(default)]
  pub sku: Value,
  #[serde(default)]
  pub category: Value,
  #[serde(default)]
  pub stock: Value,
  #[serde(default)]
  pub price: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
  pub name: String,
  pub sku: String,
  pub category: String,
  pub stock: i64,
  pub price: Decimal,
}

impl ItemDraft {
  pub fn validate(&self) -> Result<ValidatedDraft, ValidationError> {
    Ok(ValidatedDraft {
      name: required_text("name", &self.name)?,
      sku: required_text("sku", &self.sku)?,
      category: required_text("category", &self.category)?,
      stock: coerce_stock(&self.stock)?,
      price: coerce_price(&self.price)?,
    })
  }
}

/// A validated draft plus the fields the server derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
  pub name: String,
  pub sku: String,
  pub category: String,
  pub stock: i64,
  pub price: Decimal,
  pub status: StockStatus,
  pub last_updated: NaiveDate,
}

/// Attaches `status` (from stock) and `last_updated` (from the clock) to a draft.
pub fn derive_record(draft: ValidatedDraft, clock: &dyn Clock) -> ItemRecord {
  ItemRecord {
    status: compute_status(draft.stock),
    last_updated: clock.today(),
    name: draft.name,
    sku: draft.sku,
    category: draft.category,
    stock: draft.stock,
    price: draft.price,
  }
}

fn required_text(field: &'static str, raw: &Value) -> Result<String, ValidationError> {
  let text = match raw {
    Value::String(s) => s.trim().to_string(),
    Value::Number(n) => n.to_string(),
    Value::Null => return Err(ValidationError::Missing { field }),
    _ => return Err(ValidationError::Invalid { field, expected: "text" }),
  };
  if text.is_empty() {
    return Err(ValidationError::Missing { field });
  }
  Ok(text)
}

fn coerce_stock(raw: &Value) -> Result<i64, ValidationError> {
  const FIELD: &str = "stock";
  let invalid = ValidationError::Invalid {
    field: FIELD,
    expected: "a whole number",
  };

  let stock = match raw {
    Value::Null => return Err(ValidationError::Missing { field: FIELD }),
    Value::Number(n) => match n.as_i64() {
      Some(i) => i,
      None => whole_f64(n.as_f64()).ok_or(invalid)?,
    },
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() {
        return Err(ValidationError::Missing { field: FIELD });
      }
      match s.parse::<i64>() {
        Ok(i) => i,
        Err(_) => whole_f64(s.parse::<f64>().ok()).ok_or(invalid)?,
      }
    }
    _ => return Err(invalid),
  };

  if stock < 0 {
    return Err(ValidationError::Negative { field: FIELD });
  }
  Ok(stock)
}

// "12.0" is twelve; "12.5" is not a quantity.
fn whole_f64(value: Option<f64>) -> Option<i64> {
  let v = value?;
  if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
    Some(v as i64)
  } else {
    None
  }
}

/// Prices are stored as `NUMERIC(14, 4)`: ten integer digits, four decimal places.
pub const PRICE_MAX_SCALE: u32 = 4;
pub const PRICE_LIMIT: i64 = 10_000_000_000;

fn coerce_price(raw: &Value) -> Result<Decimal, ValidationError> {
  const FIELD: &str = "price";
  let invalid = ValidationError::Invalid {
    field: FIELD,
    expected: "a decimal amount",
  };

  let text = match raw {
    Value::Null => return Err(ValidationError::Missing { field: FIELD }),
    Value::Number(n) => n.to_string(),
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() {
        return Err(ValidationError::Missing { field: FIELD });
      }
      s.to_string()
    }
    _ => return Err(invalid),
  };

  let price = Decimal::from_str(&text)
    .or_else(|_| Decimal::from_scientific(&text))
    .map_err(|_| invalid)?;
  if price.is_sign_negative() && !price.is_zero() {
    return Err(ValidationError::Negative { field: FIELD });
  }
  let price = price.normalize();
  if price.scale() > PRICE_MAX_SCALE {
    return Err(ValidationError::Invalid {
      field: FIELD,
      expected: "an amount with at most 4 decimal places",
    });
  }
  if price >= Decimal::from(PRICE_LIMIT) {
    return Err(ValidationError::Invalid {
      field: FIELD,
      expected: "less than 10000000000",
    });
  }
  Ok(price)
}
