// inventory_app/src/web/extractors.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::auth_service;
use crate::state::AppState;

/// The owner a request acts for, resolved from its `Authorization: Bearer` token.
///
/// Taking this as a handler argument is what makes a route authenticated.
#[derive(Debug, Clone)]
pub struct AuthenticatedOwner {
  pub owner_id: Uuid,
  pub token: String,
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
  let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.trim().split_once(' ')?;
  let token = token.trim();
  if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
    return None;
  }
  Some(token.to_string())
}

impl FromRequest for AuthenticatedOwner {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = bearer_token(req);
    let state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let state = state.ok_or_else(|| AppError::Internal("Application state is not configured.".to_string()))?;
      let token = match token {
        Some(t) => t,
        None => {
          warn!("AuthenticatedOwner extractor: missing or malformed Authorization header.");
          return Err(AppError::Auth("Authentication required.".to_string()));
        }
      };
      let owner_id = auth_service::resolve_owner(&state, &token).await?;
      Ok(AuthenticatedOwner { owner_id, token })
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn parses_bearer_header() {
    let req = TestRequest::default()
      .insert_header((header::AUTHORIZATION, "Bearer abc123"))
      .to_http_request();
    assert_eq!(bearer_token(&req).as_deref(), Some("abc123"));

    let req = TestRequest::default()
      .insert_header((header::AUTHORIZATION, "bearer   xyz "))
      .to_http_request();
    assert_eq!(bearer_token(&req).as_deref(), Some("xyz"));
  }

  #[test]
  fn rejects_other_schemes_and_empty_tokens() {
    for value in ["Basic dXNlcjpwdw==", "Bearer", "Bearer   ", "token"] {
      let req = TestRequest::default()
        .insert_header((header::AUTHORIZATION, value))
        .to_http_request();
      assert_eq!(bearer_token(&req), None, "header = {:?}", value);
    }
    assert_eq!(bearer_token(&TestRequest::default().to_http_request()), None);
  }
}
