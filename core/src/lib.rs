// core/src/lib.rs

//! Shared inventory domain.
//!
//! Both the HTTP server and the dashboard client depend on this crate, so the
//! stock-status rule and the draft validation exist in exactly one place:
//!  - `status`: the three-tier stock status rule (and its lenient form-input variant).
//!  - `clock`: an injectable time source used to stamp `lastUpdated`.
//!  - `item`: item, draft and derived-record types plus draft coercion.
//!  - `error`: validation failures.

pub mod clock;
pub mod error;
pub mod item;
pub mod status;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::error::ValidationError;
pub use crate::item::{derive_record, InventoryItem, ItemDraft, ItemRecord, ValidatedDraft};
pub use crate::status::{compute_status, status_for_input, StockStatus, LOW_STOCK_THRESHOLD};
