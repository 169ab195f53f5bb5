use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use washday_core::{
    BookingError, BookingPort, FixedClock, InMemoryBookings, ScheduleCalculator, SchedulePolicy,
    ScheduleRequest, SchedulingService, SlotRange, TimeSlot,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
}

fn range(value: &str) -> SlotRange {
    SlotRange::parse(value).expect("valid range")
}

fn service_with(
    now: NaiveDateTime,
    bookings: Arc<dyn BookingPort>,
) -> SchedulingService<FixedClock> {
    let calculator = ScheduleCalculator::with_clock(SchedulePolicy::default(), FixedClock(now))
        .expect("default policy is valid");
    SchedulingService::new(calculator, bookings)
}

fn availability(slots: &[TimeSlot]) -> Vec<(String, bool)> {
    slots
        .iter()
        .map(|slot| (slot.value(), slot.is_available()))
        .collect()
}

struct OfflineBookings;

#[async_trait]
impl BookingPort for OfflineBookings {
    async fn booked_slots(&self, _date: NaiveDate) -> Result<Vec<String>, BookingError> {
        Err(BookingError::Unavailable("backend offline".to_owned()))
    }
}

#[tokio::test]
async fn collection_dates_mark_booked_slots_on_their_day_only() {
    let bookings = InMemoryBookings::new([(date(2024, 6, 21), range("11:00 - 14:00"))]);
    let service = service_with(at(date(2024, 6, 20), 10), Arc::new(bookings));

    let days = service.collection_dates().await.expect("bookings load");

    assert_eq!(days.len(), 14);
    let tomorrow = days.get(1).expect("tomorrow is in the horizon");
    assert_eq!(
        availability(&tomorrow.slots),
        vec![
            ("08:00 - 11:00".to_owned(), true),
            ("11:00 - 14:00".to_owned(), false),
            ("14:00 - 17:00".to_owned(), true),
            ("17:00 - 20:00".to_owned(), true),
        ]
    );
    let day_after = days.get(2).expect("day after is in the horizon");
    assert!(day_after.slots.iter().all(TimeSlot::is_available));
}

#[tokio::test]
async fn earliest_collection_skips_booked_slots() {
    let today = date(2024, 6, 20);
    let bookings = InMemoryBookings::new([(today, range("12:00 - 15:00"))]);
    let service = service_with(at(today, 10), Arc::new(bookings));

    let earliest = service.earliest_collection().await.expect("bookings load");

    let (day, slot) = earliest.expect("a slot is free");
    assert_eq!(day, today);
    assert_eq!(slot.value(), "15:00 - 18:00");
}

#[tokio::test]
async fn earliest_collection_moves_to_tomorrow_when_today_is_full() {
    let today = date(2024, 6, 20);
    let bookings: InMemoryBookings = ["12:00 - 15:00", "15:00 - 18:00", "18:00 - 20:00"]
        .into_iter()
        .map(|value| (today, range(value)))
        .collect();
    let service = service_with(at(today, 10), Arc::new(bookings));

    let (day, slot) = service
        .earliest_collection()
        .await
        .expect("bookings load")
        .expect("a slot is free");
    assert_eq!(day, date(2024, 6, 21));
    assert_eq!(slot.value(), "08:00 - 11:00");
}

#[tokio::test]
async fn delivery_dates_combine_turnaround_and_bookings() {
    let bookings = InMemoryBookings::new([(date(2024, 6, 22), range("14:00 - 17:00"))]);
    let service = service_with(at(date(2024, 6, 20), 10), Arc::new(bookings));

    let days = service
        .delivery_dates(date(2024, 6, 21), &range("11:00 - 14:00"))
        .await
        .expect("bookings load");

    let first = days.first().expect("horizon is not empty");
    assert_eq!(first.calendar_date(), date(2024, 6, 22));
    assert_eq!(
        availability(&first.slots),
        vec![
            ("08:00 - 11:00".to_owned(), false),
            ("11:00 - 14:00".to_owned(), true),
            ("14:00 - 17:00".to_owned(), false),
            ("17:00 - 20:00".to_owned(), true),
        ]
    );
}

#[tokio::test]
async fn booking_failures_propagate() {
    let service = service_with(at(date(2024, 6, 20), 10), Arc::new(OfflineBookings));

    let result = service.collection_dates().await;
    assert!(matches!(result, Err(BookingError::Unavailable(_))));

    let result = service
        .delivery_dates(date(2024, 6, 21), &range("08:00 - 11:00"))
        .await;
    assert!(matches!(result, Err(BookingError::Unavailable(_))));
}

#[tokio::test]
async fn in_memory_bookings_normalize_json_values() {
    let bookings = InMemoryBookings::from_json(
        r#"{ "2024-06-21": ["09:00-12:00", "12:00 - 15:00"], "2024-06-22": [] }"#,
    )
    .expect("valid bookings document");

    let booked = bookings
        .booked_slots(date(2024, 6, 21))
        .await
        .expect("in-memory lookups succeed");
    assert_eq!(booked, vec!["09:00 - 12:00", "12:00 - 15:00"]);
    assert!(bookings.booked_on(date(2024, 6, 23)).is_empty());
}

#[test]
fn in_memory_bookings_reject_malformed_documents() {
    assert!(matches!(
        InMemoryBookings::from_json(r#"{ "2024-06-21": ["9 to 12"] }"#),
        Err(BookingError::InvalidData(_))
    ));
    assert!(matches!(
        InMemoryBookings::from_json(r#"{ "tomorrow": ["09:00 - 12:00"] }"#),
        Err(BookingError::InvalidData(_))
    ));
    assert!(matches!(
        InMemoryBookings::from_json(r#"["09:00 - 12:00"]"#),
        Err(BookingError::Internal(_))
    ));
}

#[test]
fn validate_returns_the_client_outcome() {
    let service = service_with(at(date(2024, 6, 20), 10), Arc::new(InMemoryBookings::default()));

    let request = ScheduleRequest::parse("2024-06-21", "09:00 - 12:00", "2024-06-21", "17:00 - 20:00")
        .expect("well-formed request");
    let outcome = service.validate(&request);
    assert!(!outcome.is_valid);
    assert_eq!(
        outcome.error.as_deref(),
        Some("Minimum 24 hours required between collection and delivery")
    );
}

#[test]
fn booking_a_slot_records_its_canonical_value() {
    let mut bookings = InMemoryBookings::default();
    bookings.book(date(2024, 6, 22), range("09:00-12:00"));
    bookings.book(date(2024, 6, 22), range("12:00 - 15:00"));

    assert_eq!(bookings.booked_days(), 1);
    assert_eq!(
        bookings.booked_on(date(2024, 6, 22)),
        ["09:00 - 12:00", "12:00 - 15:00"]
    );
}
