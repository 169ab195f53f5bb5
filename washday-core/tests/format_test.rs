use chrono::{Duration, NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use washday_core::{
    ScheduleRequest, SlotRange, TimeSlot, format_date, format_duration, format_schedule_summary,
    format_short_date, format_time, format_time_range,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[rstest]
#[case(date(2024, 6, 20), "Thursday 20 June 2024")]
#[case(date(2024, 6, 1), "Saturday 1 June 2024")]
#[case(date(2025, 1, 5), "Sunday 5 January 2025")]
fn format_date_uses_long_day_first_form(#[case] input: NaiveDate, #[case] expected: &str) {
    assert_eq!(format_date(input), expected);
}

#[test]
fn format_short_date_drops_padding() {
    assert_eq!(format_short_date(date(2024, 6, 1)), "1 Jun");
    assert_eq!(format_short_date(date(2024, 12, 25)), "25 Dec");
}

#[rstest]
#[case(9, 0, "9:00 am")]
#[case(0, 0, "12:00 am")]
#[case(12, 0, "12:00 pm")]
#[case(20, 30, "8:30 pm")]
fn format_time_uses_twelve_hour_clock(
    #[case] hour: u32,
    #[case] minute: u32,
    #[case] expected: &str,
) {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time");
    assert_eq!(format_time(time), expected);
}

#[test]
fn slot_labels_are_formatted_ranges() {
    let range = SlotRange::parse("08:00 - 11:00").expect("valid range");
    assert_eq!(format_time_range(&range), "8:00 am - 11:00 am");
    assert_eq!(TimeSlot::new(range).label(), "8:00 am - 11:00 am");

    let range = SlotRange::parse("11:00-14:00").expect("valid range");
    assert_eq!(format_time_range(&range), "11:00 am - 2:00 pm");
}

#[test]
fn schedule_summary_lists_collection_then_delivery() {
    let request = ScheduleRequest::parse("2024-06-20", "09:00 - 12:00", "2024-06-21", "17:00 - 20:00")
        .expect("well-formed request");

    assert_eq!(
        format_schedule_summary(&request),
        "Collection: Thursday 20 June 2024, 9:00 am - 12:00 pm\n\
         Delivery: Friday 21 June 2024, 5:00 pm - 8:00 pm"
    );
}

#[rstest]
#[case(Duration::zero(), "0 minutes")]
#[case(Duration::minutes(1), "1 minute")]
#[case(Duration::minutes(45), "45 minutes")]
#[case(Duration::hours(1), "1 hour")]
#[case(Duration::minutes(330), "5 hours 30 minutes")]
#[case(Duration::hours(24), "1 day")]
#[case(Duration::hours(54), "2 days 6 hours")]
#[case(Duration::minutes(25 * 60 + 1), "1 day 1 hour 1 minute")]
#[case(Duration::minutes(-90), "1 hour 30 minutes")]
fn format_duration_lists_non_zero_units(#[case] duration: Duration, #[case] expected: &str) {
    assert_eq!(format_duration(duration), expected);
}

#[test]
fn formatters_are_repeatable() {
    let day = date(2024, 6, 20);
    let range = SlotRange::parse("14:00 - 17:00").expect("valid range");
    let request = ScheduleRequest {
        collection_date: day,
        collection_time: range,
        delivery_date: date(2024, 6, 22),
        delivery_time: range,
    };

    assert_eq!(format_date(day), format_date(day));
    assert_eq!(format_time_range(&range), format_time_range(&range));
    assert_eq!(format_schedule_summary(&request), format_schedule_summary(&request));
    assert_eq!(
        format_duration(Duration::hours(30)),
        format_duration(Duration::hours(30))
    );
}
