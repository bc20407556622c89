// inventory_app/src/lib.rs

//! Inventory tracking API: owner-scoped CRUD over inventory items with
//! derived stock status, plus register/login/logout with bearer sessions.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
