// inventory_app/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::auth_service::{self, Credentials, Registration};
use crate::state::AppState;
use crate::web::extractors::AuthenticatedOwner;

#[instrument(name = "handler::register", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<Registration>,
) -> Result<HttpResponse, AppError> {
  let user = auth_service::register(&app_state, req_payload.into_inner()).await?;
  info!(user_id = %user.id, "Signup successful.");
  Ok(HttpResponse::Created().json(user))
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<Credentials>,
) -> Result<HttpResponse, AppError> {
  let (user, session) = auth_service::login(&app_state, &req_payload).await?;

  // The dashboard keeps `token` and `userId`; everything after this goes through the bearer token.
  Ok(HttpResponse::Ok().json(json!({
      "token": session.token,
      "userId": user.id,
      "email": user.email,
      "firstName": user.first_name,
      "lastName": user.last_name,
      "expiresAt": session.expires_at,
  })))
}

#[instrument(name = "handler::logout", skip(app_state, owner), fields(owner_id = %owner.owner_id))]
pub async fn logout_handler(
  app_state: web::Data<AppState>,
  owner: AuthenticatedOwner,
) -> Result<HttpResponse, AppError> {
  auth_service::logout(&app_state, &owner.token).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}
