// dashboard/src/session.rs
use uuid::Uuid;

/// The signed-in identity as the dashboard remembers it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
  token: Option<String>,
  user_id: Option<Uuid>,
}

impl SessionState {
  pub fn login(&mut self, token: String, user_id: Uuid) {
    self.token = Some(token);
    self.user_id = Some(user_id);
  }

  pub fn logout(&mut self) {
    self.token = None;
    self.user_id = None;
  }

  pub fn is_authenticated(&self) -> bool {
    self.token.is_some()
  }

  pub fn token(&self) -> Option<&str> {
    self.token.as_deref()
  }

  pub fn user_id(&self) -> Option<Uuid> {
    self.user_id
  }
}
