// inventory_app/src/services/auth_service.rs

//! Account registration, login and bearer-session resolution.
//!
//! Owner identity is carried per request: a login issues a random token that
//! is stored server-side, and every authenticated request resolves its own
//! token back to an owner id. Nothing about "who is logged in" lives in
//! process-wide state.

use crate::errors::AppError; // Application-specific error type
use crate::models::{NewUser, Session, User};
use crate::state::AppState;
use argon2::{
  password_hash::{
    rand_core::{OsRng, RngCore}, // For generating random salts and tokens
    PasswordHash,
    PasswordHasher,   // The main trait for hashing
    PasswordVerifier, // The main trait for verifying
    SaltString,
  },
  Argon2, // The Argon2 algorithm instance
};
use chrono::Duration;
use serde::Deserialize;
use std::fmt::Write as _;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const SESSION_TOKEN_BYTES: usize = 32;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
  pub phone_number: Option<String>,
  pub image_url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Credentials {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

// Manual Debug so the password never reaches a log line.
impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials").field("email", &self.email).finish_non_exhaustive()
  }
}

/// Hashes a plain-text password using Argon2 with a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::Validation("Password is required.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// `Ok(false)` means a mismatch; `Err` means the stored hash itself is unusable.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// 32 random bytes, hex encoded.
pub fn generate_session_token() -> String {
  let mut bytes = [0u8; SESSION_TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  bytes.iter().fold(String::with_capacity(SESSION_TOKEN_BYTES * 2), |mut out, b| {
    let _ = write!(out, "{:02x}", b);
    out
  })
}

fn normalize_email(email: &str) -> String {
  email.trim().to_lowercase()
}

#[instrument(name = "auth_service::register", skip(state, registration), fields(email = %registration.email))]
pub async fn register(state: &AppState, registration: Registration) -> Result<User, AppError> {
  let email = normalize_email(&registration.email);
  if email.is_empty() || !email.contains('@') {
    return Err(AppError::Validation("Valid email is required.".to_string()));
  }
  let first_name = registration.first_name.trim().to_string();
  let last_name = registration.last_name.trim().to_string();
  if first_name.is_empty() || last_name.is_empty() {
    return Err(AppError::Validation("First and last name are required.".to_string()));
  }

  let password_hash = hash_password(&registration.password)?;
  let new_user = NewUser {
    email,
    first_name,
    last_name,
    phone_number: registration.phone_number.filter(|p| !p.trim().is_empty()),
    image_url: registration.image_url.filter(|u| !u.trim().is_empty()),
    password_hash,
  };

  let user = state.accounts.insert_user(new_user, state.clock.now()).await?;
  info!(user_id = %user.id, "User registered.");
  Ok(user)
}

/// Checks credentials and opens a session. Unknown email and wrong password
/// produce the same error.
#[instrument(name = "auth_service::login", skip(state, credentials), fields(email = %credentials.email))]
pub async fn login(state: &AppState, credentials: &Credentials) -> Result<(User, Session), AppError> {
  let email = normalize_email(&credentials.email);
  if email.is_empty() || credentials.password.is_empty() {
    return Err(AppError::Validation("Email and password are required.".to_string()));
  }

  let invalid = || AppError::Auth("Invalid credentials".to_string());
  let user = match state.accounts.find_user_by_email(&email).await? {
    Some(user) => user,
    None => {
      warn!("Login attempt for unknown email.");
      return Err(invalid());
    }
  };
  if !verify_password(&user.password_hash, &credentials.password)? {
    warn!(user_id = %user.id, "Password mismatch on login.");
    return Err(invalid());
  }

  let now = state.clock.now();
  let session = Session {
    token: generate_session_token(),
    user_id: user.id,
    created_at: now,
    expires_at: now + Duration::hours(state.config.session_ttl_hours),
  };
  state.accounts.insert_session(session.clone()).await?;
  info!(user_id = %user.id, "Session issued.");
  Ok((user, session))
}

/// Maps a bearer token to the owner it was issued to.
#[instrument(name = "auth_service::resolve_owner", skip_all)]
pub async fn resolve_owner(state: &AppState, token: &str) -> Result<Uuid, AppError> {
  let session = state
    .accounts
    .find_session(token)
    .await?
    .ok_or_else(|| AppError::Auth("Invalid or expired session token.".to_string()))?;

  if !session.is_active_at(state.clock.now()) {
    debug!(user_id = %session.user_id, "Session expired; revoking.");
    state.accounts.delete_session(token).await?;
    return Err(AppError::Auth("Invalid or expired session token.".to_string()));
  }
  Ok(session.user_id)
}

#[instrument(name = "auth_service::logout", skip_all)]
pub async fn logout(state: &AppState, token: &str) -> Result<(), AppError> {
  if state.accounts.delete_session(token).await? {
    info!("Session revoked.");
  }
  Ok(())
}

/// Creates the configured demo owner if seeding is enabled and it doesn't exist yet.
pub async fn ensure_seed_user(state: &AppState) -> Result<(), AppError> {
  if !state.config.seed_db {
    return Ok(());
  }
  let email = normalize_email(&state.config.seed_user_email);
  if state.accounts.find_user_by_email(&email).await?.is_some() {
    debug!(%email, "Seed user already present.");
    return Ok(());
  }
  register(
    state,
    Registration {
      first_name: "Demo".to_string(),
      last_name: "Owner".to_string(),
      email,
      password: state.config.seed_user_password.clone(),
      phone_number: None,
      image_url: None,
    },
  )
  .await?;
  info!("Seed user created.");
  Ok(())
}
