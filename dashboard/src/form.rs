// dashboard/src/form.rs
use inventory_core::{status_for_input, InventoryItem, ItemDraft, StockStatus};
use serde_json::Value;

/// The add/edit form exactly as typed: every field is text until the server says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
  pub name: String,
  pub sku: String,
  pub category: String,
  pub stock: String,
  pub price: String,
}

impl ItemForm {
  /// Prefills the edit form from an item.
  pub fn from_item(item: &InventoryItem) -> Self {
    Self {
      name: item.name.clone(),
      sku: item.sku.clone(),
      category: item.category.clone(),
      stock: item.stock.to_string(),
      price: item.price.to_string(),
    }
  }

  /// Status shown next to the stock field before submitting.
  pub fn preview_status(&self) -> StockStatus {
    status_for_input(&Value::String(self.stock.clone()))
  }

  pub fn to_draft(&self) -> ItemDraft {
    ItemDraft {
      name: Value::String(self.name.clone()),
      sku: Value::String(self.sku.clone()),
      category: Value::String(self.category.clone()),
      stock: Value::String(self.stock.clone()),
      price: Value::String(self.price.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(stock: &str) -> ItemForm {
    ItemForm {
      name: "Widget".into(),
      sku: "W-1".into(),
      category: "Tools".into(),
      stock: stock.into(),
      price: "9.99".into(),
    }
  }

  #[test]
  fn preview_follows_the_shared_rule() {
    assert_eq!(form("0").preview_status(), StockStatus::OutOfStock);
    assert_eq!(form("49").preview_status(), StockStatus::LowStock);
    assert_eq!(form("50").preview_status(), StockStatus::InStock);
    assert_eq!(form("").preview_status(), StockStatus::InStock);
    assert_eq!(form("a dozen").preview_status(), StockStatus::InStock);
  }

  #[test]
  fn draft_passes_server_validation_for_a_filled_form() {
    let validated = form("12").to_draft().validate().unwrap();
    assert_eq!(validated.stock, 12);
    assert_eq!(validated.sku, "W-1");
  }
}
