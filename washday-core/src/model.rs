//! Domain data structures for slots, booking days, and schedule requests.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleViolation};
use crate::format::{format_short_date, format_time_range, weekday_name};

/// Separator used in the wire form of a time range.
pub const RANGE_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
/// Start and end of a booking window within one day.
///
/// Serialized as `"HH:MM - HH:MM"`, the value the backend stores for a booked slot.
pub struct SlotRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl SlotRange {
    /// Build a range, rejecting empty or inverted windows.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimeFormat`] when `end` is not after `start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ScheduleError> {
        if end <= start {
            return Err(ScheduleError::InvalidTimeFormat(format!(
                "{}{RANGE_SEPARATOR}{}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse `"HH:MM - HH:MM"`; the spaces around the dash are optional.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimeFormat`] when either side is not a clock time
    /// or the window is empty.
    pub fn parse(input: &str) -> Result<Self, ScheduleError> {
        let invalid = || ScheduleError::InvalidTimeFormat(input.to_owned());

        let (start, end) = input.split_once('-').ok_or_else(invalid)?;
        let start = parse_clock_time(start.trim()).map_err(|_| invalid())?;
        let end = parse_clock_time(end.trim()).map_err(|_| invalid())?;

        Self::new(start, end).map_err(|_| invalid())
    }

    /// Start of the window.
    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End of the window.
    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Hour the window starts in.
    #[must_use]
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Wire value, `"HH:MM - HH:MM"`.
    #[must_use]
    pub fn value(&self) -> String {
        self.to_string()
    }

    /// Timestamp at which this window starts on `date`.
    #[must_use]
    pub fn starts_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}{RANGE_SEPARATOR}{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for SlotRange {
    type Err = ScheduleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl TryFrom<String> for SlotRange {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotRange> for String {
    fn from(range: SlotRange) -> Self {
        range.to_string()
    }
}

/// Parse a 24-hour `H:MM` or `HH:MM` clock time.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTimeFormat`] for a missing colon, non-digit parts,
/// or an hour/minute outside the clock.
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat(input.to_owned());

    let (hours, minutes) = input.split_once(':').ok_or_else(invalid)?;
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hour = hours.parse::<u32>().map_err(|_| invalid())?;
    let minute = minutes.parse::<u32>().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Parse an ISO-8601 calendar date.
///
/// Accepts a bare `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM:SS` datetime (as found in
/// [`DateSlot::value`]), or an RFC 3339 timestamp; only the calendar date is kept.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDate`] when none of the forms match.
pub fn parse_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = input.trim();
    let date_err = match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => return Ok(date),
        Err(err) => err,
    };

    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(ScheduleError::InvalidDate {
        input: input.to_owned(),
        source: date_err,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TimeSlotRecord", try_from = "TimeSlotRecord")]
/// One bookable window on a given day.
///
/// `value` and `label` are derived from the range and cannot drift from it.
pub struct TimeSlot {
    range: SlotRange,
    is_available: bool,
}

impl TimeSlot {
    /// Create an available slot for the given window.
    #[must_use]
    pub fn new(range: SlotRange) -> Self {
        Self {
            range,
            is_available: true,
        }
    }

    /// Copy of this slot with availability replaced.
    #[must_use]
    pub fn with_availability(&self, is_available: bool) -> Self {
        Self {
            range: self.range,
            is_available,
        }
    }

    /// Window covered by the slot.
    #[must_use]
    pub fn range(&self) -> &SlotRange {
        &self.range
    }

    /// Start as `HH:MM`.
    #[must_use]
    pub fn start(&self) -> String {
        self.range.start().format("%H:%M").to_string()
    }

    /// End as `HH:MM`.
    #[must_use]
    pub fn end(&self) -> String {
        self.range.end().format("%H:%M").to_string()
    }

    /// Wire value, always `"{start} - {end}"`.
    #[must_use]
    pub fn value(&self) -> String {
        self.range.value()
    }

    /// Human-readable label such as `"8:00 am - 11:00 am"`.
    #[must_use]
    pub fn label(&self) -> String {
        format_time_range(&self.range)
    }

    /// Whether the slot can still be booked.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.is_available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotRecord {
    start: String,
    end: String,
    value: String,
    #[serde(default)]
    label: String,
    is_available: bool,
}

impl From<TimeSlot> for TimeSlotRecord {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: slot.start(),
            end: slot.end(),
            value: slot.value(),
            label: slot.label(),
            is_available: slot.is_available,
        }
    }
}

impl TryFrom<TimeSlotRecord> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(record: TimeSlotRecord) -> Result<Self, Self::Error> {
        let range = SlotRange::new(
            parse_clock_time(&record.start)?,
            parse_clock_time(&record.end)?,
        )?;
        if SlotRange::parse(&record.value)? != range {
            return Err(ScheduleError::InvalidTimeFormat(record.value));
        }
        Ok(Self {
            range,
            is_available: record.is_available,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One calendar day in the booking horizon together with its slots.
pub struct DateSlot {
    /// `"Today"`, `"Tomorrow"`, or a short date such as `"Thu, 20 Jun"`.
    pub label: String,
    /// Midnight of the day.
    pub value: NaiveDateTime,
    /// Midnight of the day; kept alongside `value` for clients that sort on it.
    pub timestamp: NaiveDateTime,
    /// Full English weekday name.
    pub day: String,
    /// Day and abbreviated month, e.g. `"20 Jun"`.
    pub date: String,
    /// Slots offered on this day, in chronological order.
    pub slots: Vec<TimeSlot>,
}

impl DateSlot {
    /// Build the entry for `date`, labelled relative to `today`.
    #[must_use]
    pub fn new(date: NaiveDate, today: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        Self {
            label: relative_day_label(date, today),
            value: midnight,
            timestamp: midnight,
            day: weekday_name(date.weekday()).to_owned(),
            date: format_short_date(date),
            slots,
        }
    }

    /// Calendar date this entry stands for.
    #[must_use]
    pub fn calendar_date(&self) -> NaiveDate {
        self.value.date()
    }

    /// Whether at least one slot on this day can be booked.
    #[must_use]
    pub fn has_availability(&self) -> bool {
        self.slots.iter().any(TimeSlot::is_available)
    }
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        _ => format!("{}, {}", date.format("%a"), format_short_date(date)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Part of the day a slot starts in.
pub enum DayPeriod {
    /// 06:00 up to noon.
    Morning,
    /// Noon up to 17:00.
    Afternoon,
    /// 17:00 up to 22:00.
    Evening,
}

impl DayPeriod {
    /// All periods in chronological order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Half-open hour range `[from, to)` covered by the period.
    #[must_use]
    pub fn hours(self) -> (u32, u32) {
        match self {
            Self::Morning => (6, 12),
            Self::Afternoon => (12, 17),
            Self::Evening => (17, 22),
        }
    }

    /// Period containing `hour`, or `None` for night hours outside every period.
    #[must_use]
    pub fn of_hour(hour: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|period| {
            let (from, to) = period.hours();
            (from..to).contains(&hour)
        })
    }

    /// Display name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// Slots bucketed by the part of the day they start in.
pub struct PeriodGroups {
    /// Slots starting in the morning.
    pub morning: Vec<TimeSlot>,
    /// Slots starting in the afternoon.
    pub afternoon: Vec<TimeSlot>,
    /// Slots starting in the evening.
    pub evening: Vec<TimeSlot>,
}

impl PeriodGroups {
    /// Slots of one period.
    #[must_use]
    pub fn get(&self, period: DayPeriod) -> &[TimeSlot] {
        match period {
            DayPeriod::Morning => &self.morning,
            DayPeriod::Afternoon => &self.afternoon,
            DayPeriod::Evening => &self.evening,
        }
    }

    pub(crate) fn get_mut(&mut self, period: DayPeriod) -> &mut Vec<TimeSlot> {
        match period {
            DayPeriod::Morning => &mut self.morning,
            DayPeriod::Afternoon => &mut self.afternoon,
            DayPeriod::Evening => &mut self.evening,
        }
    }

    /// Non-empty periods with their slots, in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (DayPeriod, &[TimeSlot])> {
        DayPeriod::ALL
            .into_iter()
            .map(|period| (period, self.get(period)))
            .filter(|(_, slots)| !slots.is_empty())
    }

    /// Total number of grouped slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len() + self.evening.len()
    }

    /// Whether no slot landed in any period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Collection and delivery choice submitted with an order.
pub struct ScheduleRequest {
    /// Day of the collection.
    pub collection_date: NaiveDate,
    /// Collection window on that day.
    pub collection_time: SlotRange,
    /// Day of the delivery.
    pub delivery_date: NaiveDate,
    /// Delivery window on that day.
    pub delivery_time: SlotRange,
}

impl ScheduleRequest {
    /// Parse the four order-submission strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDate`] or [`ScheduleError::InvalidTimeFormat`] for
    /// the first field that does not parse.
    pub fn parse(
        collection_date: &str,
        collection_time: &str,
        delivery_date: &str,
        delivery_time: &str,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            collection_date: parse_date(collection_date)?,
            collection_time: SlotRange::parse(collection_time)?,
            delivery_date: parse_date(delivery_date)?,
            delivery_time: SlotRange::parse(delivery_time)?,
        })
    }

    /// Moment the collection window opens.
    #[must_use]
    pub fn collection_start(&self) -> NaiveDateTime {
        self.collection_time.starts_on(self.collection_date)
    }

    /// Moment the delivery window opens.
    #[must_use]
    pub fn delivery_start(&self) -> NaiveDateTime {
        self.delivery_time.starts_on(self.delivery_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Validation result in the shape clients expect: `{ isValid, error? }`.
pub struct ValidationOutcome {
    /// Whether the schedule can be booked.
    pub is_valid: bool,
    /// Message for the first failed check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), ScheduleViolation>> for ValidationOutcome {
    fn from(result: Result<(), ScheduleViolation>) -> Self {
        match result {
            Ok(()) => Self {
                is_valid: true,
                error: None,
            },
            Err(violation) => Self {
                is_valid: false,
                error: Some(violation.to_string()),
            },
        }
    }
}
