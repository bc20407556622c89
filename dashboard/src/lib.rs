// dashboard/src/lib.rs

//! Client-side state for the inventory dashboard.
//!
//! Holds the bearer session, a mirror of the owner's items as the server last
//! returned them, the search filter, and the optimistic status preview for the
//! add/edit form. Status previews use the same rule as the server
//! ([`inventory_core::compute_status`]), but the server's answer always wins.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod session;

pub use crate::api::{HttpInventoryApi, InventoryApi, LoginResponse};
pub use crate::dashboard::{Dashboard, InventorySummary};
pub use crate::error::{ClientError, DashboardError};
pub use crate::form::ItemForm;
pub use crate::session::SessionState;
