//! Business rules for the collection and delivery calendar.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Longest booking horizon a policy may offer.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Longest turnaround a policy may require (two weeks).
pub const MAX_PROCESSING_HOURS: u32 = 14 * 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Operating rules used to build slots and check schedules.
///
/// The defaults are the service's standing policy. Every field can be overridden
/// when deserializing, and missing fields fall back to the default.
pub struct SchedulePolicy {
    /// First hour a slot may start.
    pub slot_start_hour: u32,
    /// Hour at which the last slot must end.
    pub slot_end_hour: u32,
    /// Length of each slot in minutes.
    pub slot_interval_minutes: u32,
    /// From this hour on, same-day collection is no longer offered.
    pub same_day_cutoff_hour: u32,
    /// Number of days offered in the booking horizon.
    pub horizon_days: u32,
    /// Minimum turnaround between collection and delivery.
    pub processing_hours: u32,
    /// Earliest hour a delivery may be scheduled.
    pub delivery_open_hour: u32,
    /// Hour from which deliveries roll over to the next morning.
    pub delivery_close_hour: u32,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            slot_start_hour: 8,
            slot_end_hour: 20,
            slot_interval_minutes: 180,
            same_day_cutoff_hour: 20,
            horizon_days: 14,
            processing_hours: 24,
            delivery_open_hour: 8,
            delivery_close_hour: 20,
        }
    }
}

impl SchedulePolicy {
    /// Check that the policy describes a usable calendar.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSlotConfig`] when the slot grid is empty, the
    /// delivery window is inverted, or the horizon or turnaround exceeds
    /// [`MAX_HORIZON_DAYS`] / [`MAX_PROCESSING_HOURS`].
    pub fn validate(&self) -> Result<(), ScheduleError> {
        check_slot_grid(
            self.slot_start_hour,
            self.slot_end_hour,
            self.slot_interval_minutes,
        )?;
        if self.delivery_open_hour >= self.delivery_close_hour || self.delivery_close_hour > 24 {
            return Err(ScheduleError::InvalidSlotConfig(format!(
                "delivery window {}..{} is empty",
                self.delivery_open_hour, self.delivery_close_hour
            )));
        }
        if self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ScheduleError::InvalidSlotConfig(format!(
                "horizon of {} days exceeds {MAX_HORIZON_DAYS}",
                self.horizon_days
            )));
        }
        if self.processing_hours > MAX_PROCESSING_HOURS {
            return Err(ScheduleError::InvalidSlotConfig(format!(
                "processing time of {} hours exceeds {MAX_PROCESSING_HOURS}",
                self.processing_hours
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_slot_grid(
    start_hour: u32,
    end_hour: u32,
    interval_minutes: u32,
) -> Result<(), ScheduleError> {
    if interval_minutes == 0 {
        return Err(ScheduleError::InvalidSlotConfig(
            "slot interval must be positive".to_owned(),
        ));
    }
    if start_hour >= end_hour || end_hour > 23 {
        return Err(ScheduleError::InvalidSlotConfig(format!(
            "slot hours {start_hour}..{end_hour} are out of order or beyond midnight"
        )));
    }
    Ok(())
}
