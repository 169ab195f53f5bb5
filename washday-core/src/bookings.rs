//! In-memory store of booked slots keyed by calendar day.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{SlotRange, parse_date};
use crate::ports::{BookingError, BookingPort};

/// Booking source that answers from a fixed map of day to booked slot values.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookings {
    booked: HashMap<NaiveDate, Vec<String>>,
}

impl InMemoryBookings {
    /// Build a store from `(day, range)` pairs.
    #[must_use]
    pub fn new<I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, SlotRange)>,
    {
        let mut booked: HashMap<NaiveDate, Vec<String>> = HashMap::new();
        for (date, range) in bookings {
            booked.entry(date).or_default().push(range.value());
        }
        Self { booked }
    }

    /// Parse a JSON object mapping ISO dates to lists of `"HH:MM - HH:MM"` values.
    ///
    /// Values are normalized to the canonical wire form, so `"09:00-12:00"` is stored
    /// as `"09:00 - 12:00"`.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Internal`] when the document is not such an object and
    /// [`BookingError::InvalidData`] when a date or range is malformed.
    pub fn from_json(json: &str) -> Result<Self, BookingError> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|err| BookingError::Internal(err.to_string()))?;

        let mut bookings = Vec::new();
        for (day, values) in raw {
            let date = parse_date(&day)?;
            for value in values {
                bookings.push((date, SlotRange::parse(&value)?));
            }
        }
        Ok(Self::new(bookings))
    }

    /// Record one more booked slot.
    pub fn book(&mut self, date: NaiveDate, range: SlotRange) {
        self.booked.entry(date).or_default().push(range.value());
    }

    /// Number of days with at least one booking.
    #[must_use]
    pub fn booked_days(&self) -> usize {
        self.booked.len()
    }

    /// Booked values on `date` without going through the async port.
    #[must_use]
    pub fn booked_on(&self, date: NaiveDate) -> &[String] {
        self.booked.get(&date).map(Vec::as_slice).unwrap_or_default()
    }
}

#[async_trait]
impl BookingPort for InMemoryBookings {
    async fn booked_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingError> {
        Ok(self.booked_on(date).to_vec())
    }
}
