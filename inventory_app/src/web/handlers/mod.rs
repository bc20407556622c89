// inventory_app/src/web/handlers/mod.rs

// Declare handler modules
pub mod auth_handlers;
pub mod inventory_handlers;
