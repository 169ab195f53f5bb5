use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{from_str, json, to_value};
use washday_core::{
    DateSlot, DayPeriod, ScheduleError, ScheduleRequest, ScheduleViolation, SlotRange, TimeSlot,
    ValidationOutcome, group_slots_by_period,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn slot(value: &str) -> TimeSlot {
    TimeSlot::new(SlotRange::parse(value).expect("valid range"))
}

#[test]
fn time_slot_serializes_derived_fields() {
    let value = to_value(slot("08:00 - 11:00").with_availability(false))
        .expect("Failed to serialize time slot");

    assert_eq!(
        value,
        json!({
            "start": "08:00",
            "end": "11:00",
            "value": "08:00 - 11:00",
            "label": "8:00 am - 11:00 am",
            "isAvailable": false,
        })
    );
}

#[test]
fn time_slot_label_is_recomputed_on_deserialize() {
    let time_slot: TimeSlot = from_str(
        r#"{"start":"14:00","end":"17:00","value":"14:00 - 17:00","label":"stale","isAvailable":true}"#,
    )
    .expect("Failed to deserialize time slot");

    assert_eq!(time_slot.label(), "2:00 pm - 5:00 pm");
    assert!(time_slot.is_available());
}

#[test]
fn date_slot_serializes_iso_midnight() {
    let day = DateSlot::new(date(2024, 6, 21), date(2024, 6, 20), vec![slot("08:00 - 11:00")]);
    let value = to_value(&day).expect("Failed to serialize date slot");

    assert_eq!(value["label"], "Tomorrow");
    assert_eq!(value["value"], "2024-06-21T00:00:00");
    assert_eq!(value["timestamp"], "2024-06-21T00:00:00");
    assert_eq!(value["day"], "Friday");
    assert_eq!(value["date"], "21 Jun");
    assert_eq!(value["slots"][0]["value"], "08:00 - 11:00");
}

#[test]
fn date_slot_reports_availability() {
    let open = DateSlot::new(date(2024, 6, 21), date(2024, 6, 20), vec![slot("08:00 - 11:00")]);
    let full = DateSlot::new(
        date(2024, 6, 21),
        date(2024, 6, 20),
        vec![slot("08:00 - 11:00").with_availability(false)],
    );

    assert!(open.has_availability());
    assert!(!full.has_availability());
    assert!(!DateSlot::new(date(2024, 6, 21), date(2024, 6, 20), vec![]).has_availability());
}

#[test]
fn period_groups_serialize_with_period_names() {
    let groups = group_slots_by_period(&[slot("08:00 - 11:00"), slot("17:00 - 20:00")]);
    let value = to_value(&groups).expect("Failed to serialize groups");

    assert_eq!(value["Morning"][0]["value"], "08:00 - 11:00");
    assert_eq!(value["Afternoon"], json!([]));
    assert_eq!(value["Evening"][0]["value"], "17:00 - 20:00");
}

#[test]
fn day_period_boundaries() {
    let periods: Vec<Option<DayPeriod>> = [5, 6, 11, 12, 16, 17, 21, 22]
        .into_iter()
        .map(DayPeriod::of_hour)
        .collect();

    assert_eq!(
        periods,
        vec![
            None,
            Some(DayPeriod::Morning),
            Some(DayPeriod::Morning),
            Some(DayPeriod::Afternoon),
            Some(DayPeriod::Afternoon),
            Some(DayPeriod::Evening),
            Some(DayPeriod::Evening),
            None,
        ]
    );
}

#[test]
fn schedule_request_reads_wire_strings() {
    let request: ScheduleRequest = from_str(
        r#"{
            "collection_date": "2024-06-21",
            "collection_time": "09:00-12:00",
            "delivery_date": "2024-06-22",
            "delivery_time": "09:00 - 12:00"
        }"#,
    )
    .expect("Failed to deserialize schedule request");

    assert_eq!(request.collection_time, request.delivery_time);
    assert_eq!(request.collection_start().to_string(), "2024-06-21 09:00:00");

    let json = to_value(request).expect("Failed to serialize schedule request");
    assert_eq!(json["collection_time"], "09:00 - 12:00");
}

#[test]
fn schedule_request_rejects_malformed_ranges() {
    let result = from_str::<ScheduleRequest>(
        r#"{
            "collection_date": "2024-06-21",
            "collection_time": "9am-12pm",
            "delivery_date": "2024-06-22",
            "delivery_time": "09:00 - 12:00"
        }"#,
    );
    assert!(result.is_err());

    assert_eq!(
        ScheduleRequest::parse("2024-06-21", "09:00 - 12:00", "2024-06-22", "09:00 12:00"),
        Err(ScheduleError::InvalidTimeFormat("09:00 12:00".to_owned()))
    );
}

#[test]
fn validation_outcome_wire_shape() {
    let valid = to_value(ValidationOutcome::from(Ok(()))).expect("Failed to serialize outcome");
    assert_eq!(valid, json!({ "isValid": true }));

    let invalid = to_value(ValidationOutcome::from(Err(ScheduleViolation::CollectionInPast)))
        .expect("Failed to serialize outcome");
    assert_eq!(
        invalid,
        json!({ "isValid": false, "error": "Collection date cannot be in the past" })
    );
}
