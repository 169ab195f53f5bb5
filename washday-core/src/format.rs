//! Presentation helpers with fixed en-GB conventions.
//!
//! Everything here is a pure function of its arguments.

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};

use crate::model::{ScheduleRequest, SlotRange};

/// Long date, e.g. `"Thursday 20 June 2024"`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A %-d %B %Y").to_string()
}

/// Day and abbreviated month, e.g. `"20 Jun"`.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// Twelve-hour clock time, e.g. `"9:00 am"` or `"12:00 pm"`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %P").to_string()
}

/// Both ends of a window, e.g. `"9:00 am - 12:00 pm"`.
#[must_use]
pub fn format_time_range(range: &SlotRange) -> String {
    format!("{} - {}", format_time(range.start()), format_time(range.end()))
}

/// Two-line summary of a collection and delivery choice.
#[must_use]
pub fn format_schedule_summary(request: &ScheduleRequest) -> String {
    format!(
        "Collection: {}, {}\nDelivery: {}, {}",
        format_date(request.collection_date),
        format_time_range(&request.collection_time),
        format_date(request.delivery_date),
        format_time_range(&request.delivery_time),
    )
}

/// Coarse human duration such as `"1 day"`, `"2 days 6 hours"`, or `"45 minutes"`.
///
/// Negative durations are described by their magnitude.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().unsigned_abs();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| plural(amount, unit))
        .collect();

    if parts.is_empty() {
        plural(0, "minute")
    } else {
        parts.join(" ")
    }
}

/// Full English weekday name.
#[must_use]
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn plural(amount: u64, unit: &str) -> String {
    if amount == 1 {
        format!("{amount} {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
