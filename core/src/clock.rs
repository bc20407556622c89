// core/src/clock.rs

//! Time source for derived fields.
//!
//! Handlers never read the wall clock directly; they go through a `Clock`
//! held in application state so tests can pin "today".

use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  /// Current calendar date (UTC), no time component.
  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
  instant: Mutex<DateTime<Utc>>,
}

impl FixedClock {
  pub fn new(instant: DateTime<Utc>) -> Self {
    Self {
      instant: Mutex::new(instant),
    }
  }

  /// Midnight UTC of the given date.
  pub fn at_date(date: NaiveDate) -> Self {
    Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
  }

  pub fn set(&self, instant: DateTime<Utc>) {
    *self.instant.lock() = instant;
  }

  pub fn advance(&self, by: Duration) {
    let mut guard = self.instant.lock();
    *guard += by;
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    *self.instant.lock()
  }
}
