//! High-level service facade combining the calculator with booked-slot lookups.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::{ScheduleCalculator, earliest_available_slot, filter_available_slots};
use crate::model::{DateSlot, ScheduleRequest, SlotRange, TimeSlot, ValidationOutcome};
use crate::ports::{BookingError, BookingPort, Clock, SystemClock};

/// Public entry point for the booking flow.
pub struct SchedulingService<C = SystemClock> {
    calculator: ScheduleCalculator<C>,
    bookings: Arc<dyn BookingPort>,
}

impl<C: Clock> SchedulingService<C> {
    /// Create a new service bound to the provided calculator and booking source.
    #[must_use]
    pub fn new(calculator: ScheduleCalculator<C>, bookings: Arc<dyn BookingPort>) -> Self {
        Self {
            calculator,
            bookings,
        }
    }

    /// Calculator used for every computation.
    #[must_use]
    pub fn calculator(&self) -> &ScheduleCalculator<C> {
        &self.calculator
    }

    /// Collection days across the policy horizon with booked slots marked unavailable.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] if the booking source fails for any day.
    pub async fn collection_dates(&self) -> Result<Vec<DateSlot>, BookingError> {
        let horizon = self.calculator.policy().horizon_days;
        let mut days = self.calculator.available_dates(horizon);

        for day in &mut days {
            let booked = self.booked_on(day.calendar_date()).await?;
            day.slots = filter_available_slots(&day.slots, &booked);
        }

        debug!(
            days = days.len(),
            open_days = days.iter().filter(|day| day.has_availability()).count(),
            "computed collection dates"
        );
        Ok(days)
    }

    /// Delivery days for a chosen collection window.
    ///
    /// A slot is offered only when it respects the processing time and is not booked.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] if the booking source fails for any day.
    pub async fn delivery_dates(
        &self,
        collection_date: NaiveDate,
        collection_time: &SlotRange,
    ) -> Result<Vec<DateSlot>, BookingError> {
        let horizon = self.calculator.policy().horizon_days;
        let mut days = self
            .calculator
            .delivery_dates(collection_date, collection_time, horizon);

        for day in &mut days {
            let booked = self.booked_on(day.calendar_date()).await?;
            let unbooked = filter_available_slots(&day.slots, &booked);
            day.slots = day
                .slots
                .iter()
                .zip(unbooked)
                .map(|(slot, unbooked)| {
                    unbooked.with_availability(slot.is_available() && unbooked.is_available())
                })
                .collect();
        }

        debug!(
            %collection_date,
            collection_time = %collection_time,
            days = days.len(),
            "computed delivery dates"
        );
        Ok(days)
    }

    /// First bookable collection slot in the horizon.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError`] if the booking source fails.
    pub async fn earliest_collection(&self) -> Result<Option<(NaiveDate, TimeSlot)>, BookingError> {
        let days = self.collection_dates().await?;
        Ok(days.into_iter().find_map(|day| {
            earliest_available_slot(&day.slots).map(|slot| (day.calendar_date(), slot.clone()))
        }))
    }

    /// Validate a collection and delivery choice before submission.
    #[must_use]
    pub fn validate(&self, request: &ScheduleRequest) -> ValidationOutcome {
        let result = self.calculator.validate_schedule(request);
        if let Err(violation) = &result {
            debug!(%violation, ?request, "rejected schedule");
        }
        result.into()
    }

    async fn booked_on(&self, date: NaiveDate) -> Result<Vec<String>, BookingError> {
        self.bookings.booked_slots(date).await.inspect_err(|err| {
            warn!(%date, error = %err, "failed to load booked slots");
        })
    }
}
