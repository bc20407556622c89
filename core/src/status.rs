// core/src/status.rs

//! Stock-level status rule.
//!
//! The same rule drives the server's derived `status` field and the
//! dashboard's optimistic preview, so both tiers call into this module.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Quantities strictly below this (and above zero) count as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
  InStock,
  LowStock,
  OutOfStock,
}

impl StockStatus {
  pub const ALL: [StockStatus; 3] = [StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock];

  pub fn as_str(&self) -> &'static str {
    match self {
      StockStatus::InStock => "InStock",
      StockStatus::LowStock => "LowStock",
      StockStatus::OutOfStock => "OutOfStock",
    }
  }
}

impl fmt::Display for StockStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stock status label: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for StockStatus {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "InStock" => Ok(StockStatus::InStock),
      "LowStock" => Ok(StockStatus::LowStock),
      "OutOfStock" => Ok(StockStatus::OutOfStock),
      other => Err(UnknownStatus(other.to_string())),
    }
  }
}

/// Maps a stock quantity to its status. First match wins:
/// zero is out of stock, anything below the threshold is low, the rest is in stock.
///
/// Negative quantities are not special-cased and land in `LowStock`.
pub fn compute_status(stock: i64) -> StockStatus {
  if stock == 0 {
    StockStatus::OutOfStock
  } else if stock < LOW_STOCK_THRESHOLD {
    StockStatus::LowStock
  } else {
    StockStatus::InStock
  }
}

/// Lenient variant for raw form input.
///
/// Numbers and numeric strings follow `compute_status` (fractions compare numerically).
/// Anything that isn't a number reads as "unknown" and defaults to `InStock`.
pub fn status_for_input(raw: &Value) -> StockStatus {
  let quantity = match raw {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };

  match quantity {
    Some(q) if q == 0.0 => StockStatus::OutOfStock,
    Some(q) if q < LOW_STOCK_THRESHOLD as f64 => StockStatus::LowStock,
    // NaN and infinities fall through here as well.
    _ => StockStatus::InStock,
  }
}
