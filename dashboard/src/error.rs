// dashboard/src/error.rs
use thiserror::Error;

/// A failed call to the inventory API, classified by what the dashboard should do about it.
#[derive(Debug, Error)]
pub enum ClientError {
  #[error("Not authenticated")]
  Unauthorized,

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Rejected: {0}")]
  Validation(String),

  #[error("Server error ({status}): {message}")]
  Server { status: u16, message: String },

  #[error("Transport error: {0}")]
  Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DashboardError {
  #[error("Not signed in")]
  NotSignedIn,

  /// The server refused the token. Local session state has already been cleared;
  /// the caller should send the user to the login screen.
  #[error("Session expired")]
  SessionExpired,

  #[error("{0}")]
  Rejected(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Api(ClientError),
}

impl DashboardError {
  /// Text for the user-visible alert.
  pub fn alert_message(&self) -> String {
    match self {
      DashboardError::NotSignedIn | DashboardError::SessionExpired => {
        "Your session has ended. Please log in again.".to_string()
      }
      DashboardError::Rejected(msg) => msg.clone(),
      DashboardError::NotFound(_) => "That item no longer exists.".to_string(),
      DashboardError::Api(ClientError::Transport(_)) => "Could not reach the server.".to_string(),
      DashboardError::Api(_) => "Something went wrong. Please try again.".to_string(),
    }
  }

  pub fn requires_login(&self) -> bool {
    matches!(self, DashboardError::NotSignedIn | DashboardError::SessionExpired)
  }
}
