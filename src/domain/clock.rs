//! Source of "today" for date validation and age calculation.

use chrono::{NaiveDate, Utc};

/// Supplies the current calendar date.
///
/// Injected into [`crate::application::services::UserService`] so that
/// date-dependent rules can be tested against a fixed day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock frozen at a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
