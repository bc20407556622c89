// dashboard/tests/dashboard_tests.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use dashboard_client::{
  ClientError, Dashboard, DashboardError, InventoryApi, InventorySummary, ItemForm, LoginResponse, SessionState,
};
use inventory_core::{derive_record, FixedClock, InventoryItem, ItemDraft, StockStatus};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

const PASSWORD: &str = "pw";
const TOKEN: &str = "tok-1";

#[derive(Default)]
struct Backend {
  items: Vec<InventoryItem>,
  revoked: bool,
  /// Forces the status the server reports, whatever the stock says.
  status_override: Option<StockStatus>,
  calls: Vec<&'static str>,
}

/// Stands in for the HTTP API; clones share one backend.
#[derive(Clone)]
struct FakeApi {
  owner_id: Uuid,
  clock: Arc<FixedClock>,
  backend: Arc<Mutex<Backend>>,
}

impl FakeApi {
  fn new() -> Self {
    Self {
      owner_id: Uuid::new_v4(),
      clock: Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())),
      backend: Arc::new(Mutex::new(Backend::default())),
    }
  }

  fn authorize(&self, token: &str, call: &'static str) -> Result<(), ClientError> {
    let mut backend = self.backend.lock();
    backend.calls.push(call);
    if token != TOKEN || backend.revoked {
      return Err(ClientError::Unauthorized);
    }
    Ok(())
  }

  fn build(&self, id: Uuid, draft: &ItemDraft) -> Result<InventoryItem, ClientError> {
    let validated = draft
      .validate()
      .map_err(|e| ClientError::Validation(e.to_string()))?;
    let mut record = derive_record(validated, self.clock.as_ref());
    if let Some(status) = self.backend.lock().status_override {
      record.status = status;
    }
    let now = inventory_core::Clock::now(self.clock.as_ref());
    Ok(InventoryItem::from_record(id, self.owner_id, record, now, now))
  }
}

#[async_trait]
impl InventoryApi for FakeApi {
  async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
    if password != PASSWORD {
      return Err(ClientError::Unauthorized);
    }
    self.backend.lock().revoked = false;
    Ok(LoginResponse {
      token: TOKEN.to_string(),
      user_id: self.owner_id,
      email: email.to_string(),
      first_name: "Test".to_string(),
      last_name: "Owner".to_string(),
    })
  }

  async fn logout(&self, token: &str) -> Result<(), ClientError> {
    self.authorize(token, "logout")?;
    self.backend.lock().revoked = true;
    Ok(())
  }

  async fn list(&self, token: &str) -> Result<Vec<InventoryItem>, ClientError> {
    self.authorize(token, "list")?;
    Ok(self.backend.lock().items.clone())
  }

  async fn create(&self, token: &str, draft: &ItemDraft) -> Result<InventoryItem, ClientError> {
    self.authorize(token, "create")?;
    let item = self.build(Uuid::new_v4(), draft)?;
    self.backend.lock().items.insert(0, item.clone());
    Ok(item)
  }

  async fn update(&self, token: &str, id: Uuid, draft: &ItemDraft) -> Result<InventoryItem, ClientError> {
    self.authorize(token, "update")?;
    if !self.backend.lock().items.iter().any(|i| i.id == id) {
      return Err(ClientError::NotFound(format!("Inventory item {} not found", id)));
    }
    let item = self.build(id, draft)?;
    let mut backend = self.backend.lock();
    backend.items.retain(|i| i.id != id);
    backend.items.insert(0, item.clone());
    Ok(item)
  }

  async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
    self.authorize(token, "delete")?;
    let mut backend = self.backend.lock();
    let before = backend.items.len();
    backend.items.retain(|i| i.id != id);
    if backend.items.len() == before {
      return Err(ClientError::NotFound(format!("Inventory item {} not found", id)));
    }
    Ok(())
  }
}

fn form(name: &str, sku: &str, category: &str, stock: &str, price: &str) -> ItemForm {
  ItemForm {
    name: name.into(),
    sku: sku.into(),
    category: category.into(),
    stock: stock.into(),
    price: price.into(),
  }
}

async fn signed_in() -> (Dashboard<FakeApi>, FakeApi) {
  let api = FakeApi::new();
  let mut dashboard = Dashboard::new(api.clone());
  dashboard.sign_in("owner@example.com", PASSWORD).await.unwrap();
  (dashboard, api)
}

#[tokio::test]
async fn sign_in_loads_the_mirror() {
  let api = FakeApi::new();
  {
    let mut seeded = Dashboard::new(api.clone());
    seeded.sign_in("owner@example.com", PASSWORD).await.unwrap();
    seeded.submit_new(&form("Widget", "W-1", "Tools", "5", "2.50")).await.unwrap();
  }

  let mut dashboard = Dashboard::new(api.clone());
  assert!(!dashboard.session().is_authenticated());
  dashboard.sign_in("owner@example.com", PASSWORD).await.unwrap();

  assert!(dashboard.session().is_authenticated());
  assert_eq!(dashboard.session().user_id(), Some(api.owner_id));
  assert_eq!(dashboard.items().len(), 1);
  assert_eq!(dashboard.items()[0].sku, "W-1");
}

#[tokio::test]
async fn wrong_password_is_rejected_without_a_session() {
  let mut dashboard = Dashboard::new(FakeApi::new());
  let err = dashboard.sign_in("owner@example.com", "nope").await.unwrap_err();
  assert!(matches!(err, DashboardError::Rejected(_)));
  assert_eq!(err.alert_message(), "Invalid credentials");
  assert!(!dashboard.session().is_authenticated());
}

#[tokio::test]
async fn calls_without_a_session_never_reach_the_api() {
  let api = FakeApi::new();
  let mut dashboard = Dashboard::new(api.clone());

  assert!(matches!(dashboard.refresh().await, Err(DashboardError::NotSignedIn)));
  let err = dashboard
    .submit_new(&form("Widget", "W-1", "Tools", "5", "1"))
    .await
    .unwrap_err();
  assert!(err.requires_login());
  assert!(api.backend.lock().calls.is_empty());
}

#[tokio::test]
async fn server_status_replaces_the_optimistic_preview() {
  let (mut dashboard, api) = signed_in().await;
  let low = form("Bolts", "B-7", "Hardware", "49", "0.10");
  assert_eq!(dashboard.preview_status(&low), StockStatus::LowStock);

  api.backend.lock().status_override = Some(StockStatus::OutOfStock);
  let created = dashboard.submit_new(&low).await.unwrap().clone();
  assert_eq!(created.status, StockStatus::OutOfStock);
  assert_eq!(dashboard.items()[0].status, StockStatus::OutOfStock);
}

#[tokio::test]
async fn preview_tracks_the_threshold_while_typing() {
  let (dashboard, _) = signed_in().await;
  let mut editing = form("Bolts", "B-7", "Hardware", "", "0.10");
  for (typed, expected) in [
    ("", StockStatus::InStock),
    ("0", StockStatus::OutOfStock),
    ("4", StockStatus::LowStock),
    ("49", StockStatus::LowStock),
    ("50", StockStatus::InStock),
    ("5O", StockStatus::InStock),
  ] {
    editing.stock = typed.to_string();
    assert_eq!(dashboard.preview_status(&editing), expected, "stock = {:?}", typed);
  }
}

#[tokio::test]
async fn rejected_drafts_leave_the_mirror_alone() {
  let (mut dashboard, _) = signed_in().await;
  let err = dashboard
    .submit_new(&form("", "X-1", "Misc", "1", "1"))
    .await
    .unwrap_err();
  assert!(matches!(err, DashboardError::Rejected(_)));
  assert!(!err.requires_login());
  assert!(dashboard.items().is_empty());
  assert!(dashboard.session().is_authenticated());
}

#[tokio::test]
async fn edits_move_the_item_to_the_front() {
  let (mut dashboard, _) = signed_in().await;
  let first = dashboard
    .submit_new(&form("Widget", "W-1", "Tools", "60", "2"))
    .await
    .unwrap()
    .id;
  dashboard
    .submit_new(&form("Gadget", "G-1", "Tools", "10", "3"))
    .await
    .unwrap();
  assert_eq!(dashboard.items()[1].id, first);

  let mut edit = ItemForm::from_item(&dashboard.items()[1]);
  edit.stock = "0".to_string();
  let updated = dashboard.submit_edit(first, &edit).await.unwrap().clone();

  assert_eq!(updated.id, first);
  assert_eq!(updated.status, StockStatus::OutOfStock);
  assert_eq!(dashboard.items().len(), 2);
  assert_eq!(dashboard.items()[0].id, first);
}

#[tokio::test]
async fn search_matches_name_sku_and_category() {
  let (mut dashboard, _) = signed_in().await;
  for f in [
    form("Claw Hammer", "HM-01", "Tools", "12", "19.99"),
    form("Deck Screws", "SC-88", "Fasteners", "400", "0.05"),
    form("Work Gloves", "GL-02", "Safety", "0", "7.50"),
  ] {
    dashboard.submit_new(&f).await.unwrap();
  }

  let names = |d: &Dashboard<FakeApi>| d.visible_items().iter().map(|i| i.name.clone()).collect::<Vec<_>>();

  dashboard.set_search("hammer");
  assert_eq!(names(&dashboard), vec!["Claw Hammer"]);

  dashboard.set_search("sc-8");
  assert_eq!(names(&dashboard), vec!["Deck Screws"]);

  dashboard.set_search("  SAFETY ");
  assert_eq!(names(&dashboard), vec!["Work Gloves"]);

  dashboard.set_search("");
  assert_eq!(dashboard.visible_items().len(), 3);

  dashboard.set_search("nothing like this");
  assert!(dashboard.visible_items().is_empty());
}

#[tokio::test]
async fn summary_counts_every_status() {
  let (mut dashboard, _) = signed_in().await;
  for f in [
    form("A", "A-1", "X", "0", "5"),
    form("B", "B-1", "X", "10", "1.5"),
    form("C", "C-1", "X", "50", "2"),
    form("D", "D-1", "X", "120", "0.25"),
  ] {
    dashboard.submit_new(&f).await.unwrap();
  }

  assert_eq!(
    dashboard.summary(),
    InventorySummary {
      total_items: 4,
      in_stock: 2,
      low_stock: 1,
      out_of_stock: 1,
      total_units: 180,
      total_value: Decimal::from_str("145").unwrap(),
    }
  );
}

#[tokio::test]
async fn summary_saturates_instead_of_overflowing() {
  let (mut dashboard, _) = signed_in().await;
  dashboard
    .submit_new(&form("Big", "B-1", "X", &i64::MAX.to_string(), "9999999999"))
    .await
    .unwrap();
  dashboard.submit_new(&form("One", "O-1", "X", "1", "1")).await.unwrap();

  let summary = dashboard.summary();
  assert_eq!(summary.total_items, 2);
  assert_eq!(summary.total_units, i64::MAX);
  assert_eq!(summary.total_value, Decimal::MAX);
}

#[tokio::test]
async fn removal_drops_the_item_and_a_missing_item_is_forgotten() {
  let (mut dashboard, api) = signed_in().await;
  let keep = dashboard.submit_new(&form("Keep", "K-1", "X", "1", "1")).await.unwrap().id;
  let gone = dashboard.submit_new(&form("Gone", "G-1", "X", "1", "1")).await.unwrap().id;
  let stale = dashboard.submit_new(&form("Stale", "S-1", "X", "1", "1")).await.unwrap().id;

  dashboard.remove(gone).await.unwrap();
  assert!(dashboard.items().iter().all(|i| i.id != gone));

  // Deleted elsewhere: the server says 404 and the dashboard stops showing it.
  api.backend.lock().items.retain(|i| i.id != stale);
  let err = dashboard.remove(stale).await.unwrap_err();
  assert!(matches!(err, DashboardError::NotFound(_)));
  assert_eq!(dashboard.items().len(), 1);
  assert_eq!(dashboard.items()[0].id, keep);
}

#[tokio::test]
async fn a_401_mid_session_signs_out_locally() {
  let (mut dashboard, api) = signed_in().await;
  dashboard.submit_new(&form("Widget", "W-1", "Tools", "5", "1")).await.unwrap();

  api.backend.lock().revoked = true;
  let err = dashboard.refresh().await.unwrap_err();

  assert!(matches!(err, DashboardError::SessionExpired));
  assert!(err.requires_login());
  assert!(!dashboard.session().is_authenticated());
  assert!(dashboard.items().is_empty());
}

#[tokio::test]
async fn sign_out_clears_state_and_revokes_the_token() {
  let (mut dashboard, api) = signed_in().await;
  dashboard.submit_new(&form("Widget", "W-1", "Tools", "5", "1")).await.unwrap();

  dashboard.sign_out().await;
  assert!(!dashboard.session().is_authenticated());
  assert!(dashboard.items().is_empty());
  assert!(api.backend.lock().revoked);
  assert_eq!(api.backend.lock().calls.last(), Some(&"logout"));
}

#[tokio::test]
async fn a_remembered_session_resumes_without_logging_in() {
  let api = FakeApi::new();
  let mut session = SessionState::default();
  session.login(TOKEN.to_string(), api.owner_id);

  let mut dashboard = Dashboard::with_session(api.clone(), session);
  dashboard.refresh().await.unwrap();
  assert!(dashboard.session().is_authenticated());
  assert_eq!(api.backend.lock().calls, vec!["list"]);
}
