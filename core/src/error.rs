// core/src/error.rs
use thiserror::Error;

/// Why an item draft was rejected. Each variant names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{field} is required")]
  Missing { field: &'static str },

  #[error("{field} must be {expected}")]
  Invalid {
    field: &'static str,
    expected: &'static str,
  },

  #[error("{field} must not be negative")]
  Negative { field: &'static str },
}

impl ValidationError {
  pub fn field(&self) -> &'static str {
    match self {
      ValidationError::Missing { field }
      | ValidationError::Invalid { field, .. }
      | ValidationError::Negative { field } => field,
    }
  }
}
