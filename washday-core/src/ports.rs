//! Traits describing the capabilities the scheduler depends on.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::ScheduleError;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while looking up booked slots.
pub enum BookingError {
    /// The booking source could not be reached.
    #[error("Booking source unavailable: {0}")]
    Unavailable(String),
    /// Stored booking data was malformed.
    #[error("Invalid booking data: {0}")]
    InvalidData(#[from] ScheduleError),
    /// Internal booking source error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Source of the current local wall-clock time.
///
/// Every scheduling operation reads the clock once, so a fixed clock makes the
/// whole calculation deterministic.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Clock backed by the machine's local time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Clock frozen at a single instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[async_trait]
/// Trait for backends that know which slots are already taken.
pub trait BookingPort: Send + Sync {
    /// Slot values (`"HH:MM - HH:MM"`) already booked on `date`.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] when the backend cannot answer.
    async fn booked_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingError>;
}
