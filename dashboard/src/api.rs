// dashboard/src/api.rs

//! Transport to the inventory API.

use async_trait::async_trait;
use inventory_core::{InventoryItem, ItemDraft};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub token: String,
  pub user_id: Uuid,
  pub email: String,
  pub first_name: String,
  pub last_name: String,
}

#[async_trait]
pub trait InventoryApi: Send + Sync {
  async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError>;
  async fn logout(&self, token: &str) -> Result<(), ClientError>;
  async fn list(&self, token: &str) -> Result<Vec<InventoryItem>, ClientError>;
  async fn create(&self, token: &str, draft: &ItemDraft) -> Result<InventoryItem, ClientError>;
  async fn update(&self, token: &str, id: Uuid, draft: &ItemDraft) -> Result<InventoryItem, ClientError>;
  async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError>;
}

/// `InventoryApi` over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
  client: Client,
  base_url: String,
}

impl HttpInventoryApi {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self::with_client(Client::new(), base_url)
  }

  pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { client, base_url }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json::<T>().await?)
  }
}

/// Turns a non-2xx response into the matching `ClientError`, reading the `{"error": ...}` body.
async fn check_status(response: Response) -> Result<Response, ClientError> {
  let status = response.status();
  if status.is_success() {
    return Ok(response);
  }

  let message = response
    .json::<Value>()
    .await
    .ok()
    .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
  warn!(status = status.as_u16(), %message, "Inventory API call failed.");

  Err(match status {
    StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
    StatusCode::NOT_FOUND => ClientError::NotFound(message),
    StatusCode::BAD_REQUEST => ClientError::Validation(message),
    other => ClientError::Server {
      status: other.as_u16(),
      message,
    },
  })
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
  #[instrument(name = "api::login", skip(self, password))]
  async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
    let request = self
      .client
      .post(self.url("/api/login"))
      .json(&json!({ "email": email, "password": password }));
    self.send(request).await
  }

  #[instrument(name = "api::logout", skip_all)]
  async fn logout(&self, token: &str) -> Result<(), ClientError> {
    let request = self.client.post(self.url("/api/logout")).bearer_auth(token);
    check_status(request.send().await?).await?;
    Ok(())
  }

  #[instrument(name = "api::list", skip_all)]
  async fn list(&self, token: &str) -> Result<Vec<InventoryItem>, ClientError> {
    let items: Vec<InventoryItem> = self.send(self.client.get(self.url("/inventory")).bearer_auth(token)).await?;
    debug!("Fetched {} items.", items.len());
    Ok(items)
  }

  #[instrument(name = "api::create", skip_all)]
  async fn create(&self, token: &str, draft: &ItemDraft) -> Result<InventoryItem, ClientError> {
    let request = self.client.post(self.url("/inventory")).bearer_auth(token).json(draft);
    self.send(request).await
  }

  #[instrument(name = "api::update", skip(self, token, draft))]
  async fn update(&self, token: &str, id: Uuid, draft: &ItemDraft) -> Result<InventoryItem, ClientError> {
    let request = self
      .client
      .put(self.url(&format!("/inventory/{}", id)))
      .bearer_auth(token)
      .json(draft);
    self.send(request).await
  }

  #[instrument(name = "api::delete", skip(self, token))]
  async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
    let request = self.client.delete(self.url(&format!("/inventory/{}", id))).bearer_auth(token);
    check_status(request.send().await?).await?;
    Ok(())
  }
}
