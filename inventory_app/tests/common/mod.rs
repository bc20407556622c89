// inventory_app/tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset

use chrono::{NaiveDate, TimeZone, Utc};
use inventory_app::services::auth_service::{self, Credentials, Registration};
use inventory_app::{AppConfig, AppState};
use inventory_core::FixedClock;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

/// Builds the full route table around `$state` and initialises it as a test service.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(inventory_app::web::configure_app_routes),
    )
    .await
  };
}

pub const PASSWORD: &str = "s3cret-pass";

pub fn start_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
  Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()))
}

pub fn default_config() -> AppConfig {
  AppConfig::from_lookup(|_| None).expect("defaults are valid")
}

/// In-memory app state driven by `clock`.
pub fn memory_state(clock: Arc<FixedClock>) -> AppState {
  AppState::with_memory_store(Arc::new(default_config()), clock)
}

/// Registers `email` straight through the service layer and logs in.
/// Returns the owner id and a bearer token.
pub async fn owner_with_token(state: &AppState, email: &str) -> (Uuid, String) {
  auth_service::register(
    state,
    Registration {
      first_name: "Test".to_string(),
      last_name: "Owner".to_string(),
      email: email.to_string(),
      password: PASSWORD.to_string(),
      phone_number: None,
      image_url: None,
    },
  )
  .await
  .expect("registration succeeds");

  let (user, session) = auth_service::login(
    state,
    &Credentials {
      email: email.to_string(),
      password: PASSWORD.to_string(),
    },
  )
  .await
  .expect("login succeeds");
  (user.id, session.token)
}

pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
  (actix_web::http::header::AUTHORIZATION, format!("Bearer {}", token))
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
