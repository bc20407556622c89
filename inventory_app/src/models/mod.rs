// inventory_app/src/models/mod.rs

//! Account-side records. Inventory items live in `inventory_core` so the
//! dashboard client shares the exact same type.

pub mod session;
pub mod user;

pub use inventory_core::{InventoryItem, ItemDraft, ItemRecord, StockStatus};
pub use session::Session;
pub use user::{NewUser, User};
