//! Collection and delivery calendar: slot grids, booking horizons, delivery lower
//! bounds, and schedule validation.
//!
//! Operations that depend on "now" live on [`ScheduleCalculator`] and read its
//! [`Clock`] exactly once per call. Operations on already-built slots are free
//! functions.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

use crate::error::{ScheduleError, ScheduleViolation};
use crate::model::{
    DateSlot, DayPeriod, PeriodGroups, ScheduleRequest, SlotRange, TimeSlot, ValidationOutcome,
};
use crate::policy::{SchedulePolicy, check_slot_grid};
use crate::ports::{Clock, SystemClock};

/// Same-day slots start on the next multiple of this many hours after the current hour.
const SAME_DAY_STEP_HOURS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Validated partition of `[start_hour, end_hour)` into fixed-length windows.
struct SlotGrid {
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
}

impl SlotGrid {
    fn new(start_hour: u32, end_hour: u32, interval_minutes: u32) -> Result<Self, ScheduleError> {
        check_slot_grid(start_hour, end_hour, interval_minutes)?;
        Ok(Self {
            start_hour,
            end_hour,
            interval_minutes,
        })
    }

    /// Slots for `date` as seen at `now`; windows already started today are skipped.
    fn slots_on(self, date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        let first_hour = if date == now.date() {
            let next_boundary = (now.hour() + 1).div_ceil(SAME_DAY_STEP_HOURS) * SAME_DAY_STEP_HOURS;
            next_boundary.max(self.start_hour)
        } else {
            self.start_hour
        };
        self.slots_from(first_hour)
    }

    fn slots_from(self, first_hour: u32) -> Vec<TimeSlot> {
        let end_minute = self.end_hour * 60;
        let mut slots = Vec::new();
        let mut start_minute = first_hour * 60;

        while start_minute < end_minute {
            let stop_minute = (start_minute + self.interval_minutes).min(end_minute);
            if let (Some(start), Some(end)) = (minute_of_day(start_minute), minute_of_day(stop_minute))
                && let Ok(range) = SlotRange::new(start, end)
            {
                slots.push(TimeSlot::new(range));
            }
            start_minute += self.interval_minutes;
        }
        slots
    }
}

fn minute_of_day(minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(minute * 60, 0)
}

/// Computes booking calendars under a [`SchedulePolicy`] against an injected clock.
#[derive(Debug, Clone)]
pub struct ScheduleCalculator<C = SystemClock> {
    policy: SchedulePolicy,
    grid: SlotGrid,
    delivery_open: NaiveTime,
    clock: C,
}

impl ScheduleCalculator<SystemClock> {
    /// Calculator reading the local system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSlotConfig`] when the policy is unusable.
    pub fn new(policy: SchedulePolicy) -> Result<Self, ScheduleError> {
        Self::with_clock(policy, SystemClock)
    }
}

impl<C: Clock> ScheduleCalculator<C> {
    /// Calculator reading the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSlotConfig`] when the policy is unusable.
    pub fn with_clock(policy: SchedulePolicy, clock: C) -> Result<Self, ScheduleError> {
        policy.validate()?;
        let grid = SlotGrid::new(
            policy.slot_start_hour,
            policy.slot_end_hour,
            policy.slot_interval_minutes,
        )?;
        let delivery_open = NaiveTime::from_hms_opt(policy.delivery_open_hour, 0, 0).ok_or_else(|| {
            ScheduleError::InvalidSlotConfig(format!(
                "delivery opening hour {} is not a clock hour",
                policy.delivery_open_hour
            ))
        })?;

        Ok(Self {
            policy,
            grid,
            delivery_open,
            clock,
        })
    }

    /// Rules this calculator applies.
    #[must_use]
    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// First day a collection can be requested for.
    ///
    /// Today until the same-day cut-off hour, tomorrow afterwards.
    #[must_use]
    pub fn next_available_date(&self) -> NaiveDate {
        self.next_available_date_at(self.clock.now())
    }

    fn next_available_date_at(&self, now: NaiveDateTime) -> NaiveDate {
        let today = now.date();
        if now.hour() < self.policy.same_day_cutoff_hour {
            today
        } else {
            today + Days::new(1)
        }
    }

    /// Partition `[start_hour, end_hour)` on `date` into `interval_minutes` windows.
    ///
    /// The last window is clamped to `end_hour`. When `date` is today, windows
    /// before the next three-hour boundary after the current hour are left out, so
    /// the result is empty late in the day.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSlotConfig`] for a zero interval, an empty hour
    /// range, or an end hour past 23.
    pub fn generate_time_slots(
        &self,
        date: NaiveDate,
        start_hour: u32,
        end_hour: u32,
        interval_minutes: u32,
    ) -> Result<Vec<TimeSlot>, ScheduleError> {
        let grid = SlotGrid::new(start_hour, end_hour, interval_minutes)?;
        Ok(grid.slots_on(date, self.clock.now()))
    }

    /// Slots on `date` using the policy's slot grid.
    #[must_use]
    pub fn time_slots_for(&self, date: NaiveDate) -> Vec<TimeSlot> {
        self.grid.slots_on(date, self.clock.now())
    }

    /// `number_of_days` consecutive booking days starting at [`Self::next_available_date`].
    #[must_use]
    pub fn available_dates(&self, number_of_days: u32) -> Vec<DateSlot> {
        let now = self.clock.now();
        let today = now.date();
        let first_day = self.next_available_date_at(now);

        first_day
            .iter_days()
            .take(number_of_days as usize)
            .map(|date| DateSlot::new(date, today, self.grid.slots_on(date, now)))
            .collect()
    }

    /// Earliest moment a delivery may start for a collection in `collection_time` on
    /// `collection_date`.
    ///
    /// The collection start plus `processing_hours`, moved to the next opening time
    /// when it falls outside the delivery window. Saturates at
    /// [`NaiveDateTime::MAX`] instead of overflowing the calendar.
    #[must_use]
    pub fn minimum_delivery_date(
        &self,
        collection_date: NaiveDate,
        collection_time: &SlotRange,
        processing_hours: u32,
    ) -> NaiveDateTime {
        let earliest = collection_time
            .starts_on(collection_date)
            .checked_add_signed(Duration::hours(i64::from(processing_hours)))
            .unwrap_or(NaiveDateTime::MAX);

        if earliest.hour() < self.policy.delivery_open_hour {
            earliest.date().and_time(self.delivery_open)
        } else if earliest.hour() >= self.policy.delivery_close_hour {
            earliest
                .date()
                .checked_add_days(Days::new(1))
                .map_or(earliest, |next_day| next_day.and_time(self.delivery_open))
        } else {
            earliest
        }
    }

    /// Delivery days for a chosen collection, starting on the day of the minimum
    /// delivery time.
    ///
    /// Slots that open before the minimum delivery time are marked unavailable.
    #[must_use]
    pub fn delivery_dates(
        &self,
        collection_date: NaiveDate,
        collection_time: &SlotRange,
        number_of_days: u32,
    ) -> Vec<DateSlot> {
        let today = self.clock.today();
        let earliest = self.minimum_delivery_date(
            collection_date,
            collection_time,
            self.policy.processing_hours,
        );

        earliest
            .date()
            .iter_days()
            .take(number_of_days as usize)
            .map(|date| {
                let slots = self
                    .grid
                    .slots_from(self.grid.start_hour)
                    .into_iter()
                    .map(|slot| {
                        let open = slot.range().starts_on(date) >= earliest;
                        slot.with_availability(open)
                    })
                    .collect();
                DateSlot::new(date, today, slots)
            })
            .collect()
    }

    /// Check a collection and delivery pair.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ScheduleViolation`]: collection in the past,
    /// delivery not after collection, or too little processing time.
    ///
    /// The turnaround check uses the policy's `processing_hours`, not a fixed 24
    /// hours. With the default policy the two agree; a custom policy also changes
    /// the hours named in the violation message.
    pub fn validate_schedule(&self, request: &ScheduleRequest) -> Result<(), ScheduleViolation> {
        if request.collection_date < self.clock.today() {
            return Err(ScheduleViolation::CollectionInPast);
        }

        let collection = request.collection_start();
        let delivery = request.delivery_start();
        if delivery <= collection {
            return Err(ScheduleViolation::DeliveryBeforeCollection);
        }

        let processing_hours = self.policy.processing_hours;
        let minimum = self.minimum_delivery_date(
            request.collection_date,
            &request.collection_time,
            processing_hours,
        );
        if delivery < minimum {
            return Err(ScheduleViolation::InsufficientProcessingTime { processing_hours });
        }

        Ok(())
    }

    /// Validate the raw order-submission strings.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when a date or time range is malformed. A
    /// well-formed but unbookable schedule is reported through the outcome instead.
    pub fn validate_schedule_strings(
        &self,
        collection_date: &str,
        collection_time: &str,
        delivery_date: &str,
        delivery_time: &str,
    ) -> Result<ValidationOutcome, ScheduleError> {
        let request =
            ScheduleRequest::parse(collection_date, collection_time, delivery_date, delivery_time)?;
        Ok(self.validate_schedule(&request).into())
    }
}

/// Copy of `slots` with every slot whose value appears in `booked` marked unavailable.
#[must_use]
pub fn filter_available_slots<S: AsRef<str>>(slots: &[TimeSlot], booked: &[S]) -> Vec<TimeSlot> {
    slots
        .iter()
        .map(|slot| {
            let value = slot.value();
            let taken = booked.iter().any(|booked| booked.as_ref() == value);
            slot.with_availability(!taken)
        })
        .collect()
}

/// First bookable slot in `slots`, in slice order.
#[must_use]
pub fn earliest_available_slot(slots: &[TimeSlot]) -> Option<&TimeSlot> {
    slots.iter().find(|slot| slot.is_available())
}

/// Bucket slots by the [`DayPeriod`] their start hour falls in.
///
/// Slots starting at night, outside every period, are left out.
#[must_use]
pub fn group_slots_by_period(slots: &[TimeSlot]) -> PeriodGroups {
    let mut groups = PeriodGroups::default();
    for slot in slots {
        if let Some(period) = DayPeriod::of_hour(slot.range().start_hour()) {
            groups.get_mut(period).push(slot.clone());
        }
    }
    groups
}

/// Number of weekdays from `start` to `end`, both inclusive.
///
/// Zero when `end` precedes `start`.
#[must_use]
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
