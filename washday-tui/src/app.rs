use std::sync::Arc;

use chrono::NaiveDate;
use washday_core::{
    DateSlot, ScheduleRequest, SchedulingService, SlotRange, TimeSlot, ValidationOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    CollectionDate,
    CollectionSlot,
    DeliveryDate,
    DeliverySlot,
    Summary,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Choice {
    pub date: NaiveDate,
    pub range: SlotRange,
}

pub(crate) struct App {
    pub service: Arc<SchedulingService>,

    pub screen: Screen,

    pub collection_days: Vec<DateSlot>,
    pub collection_day_index: usize,
    pub collection_slot_index: usize,
    pub collection: Option<Choice>,

    pub delivery_days: Vec<DateSlot>,
    pub delivery_day_index: usize,
    pub delivery_slot_index: usize,
    pub delivery: Option<Choice>,

    pub outcome: Option<ValidationOutcome>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<SchedulingService>) -> Self {
        Self {
            service,
            screen: Screen::CollectionDate,
            collection_days: Vec::new(),
            collection_day_index: 0,
            collection_slot_index: 0,
            collection: None,
            delivery_days: Vec::new(),
            delivery_day_index: 0,
            delivery_slot_index: 0,
            delivery: None,
            outcome: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn restart(&mut self) {
        self.screen = Screen::CollectionDate;
        self.collection_day_index = 0;
        self.collection_slot_index = 0;
        self.collection = None;
        self.delivery_days.clear();
        self.delivery = None;
        self.outcome = None;
    }

    pub(crate) fn set_collection_days(&mut self, days: Vec<DateSlot>) {
        self.collection_days = days;
        self.collection_day_index = self
            .collection_days
            .iter()
            .position(DateSlot::has_availability)
            .unwrap_or(0);
    }

    pub(crate) fn set_delivery_days(&mut self, days: Vec<DateSlot>) {
        self.delivery_days = days;
        self.delivery_day_index = self
            .delivery_days
            .iter()
            .position(DateSlot::has_availability)
            .unwrap_or(0);
        self.delivery_slot_index = 0;
        self.delivery = None;
        self.screen = Screen::DeliveryDate;
    }

    pub(crate) fn collection_day(&self) -> Option<&DateSlot> {
        self.collection_days.get(self.collection_day_index)
    }

    pub(crate) fn delivery_day(&self) -> Option<&DateSlot> {
        self.delivery_days.get(self.delivery_day_index)
    }

    /// Days and cursor for the date screen currently shown.
    pub(crate) fn days_and_index_mut(&mut self) -> (&[DateSlot], &mut usize) {
        match self.screen {
            Screen::DeliveryDate | Screen::DeliverySlot => {
                (&self.delivery_days, &mut self.delivery_day_index)
            }
            _ => (&self.collection_days, &mut self.collection_day_index),
        }
    }

    /// Slots and cursor for the slot screen currently shown.
    pub(crate) fn slots_and_index_mut(&mut self) -> (&[TimeSlot], &mut usize) {
        match self.screen {
            Screen::DeliveryDate | Screen::DeliverySlot => (
                self.delivery_days
                    .get(self.delivery_day_index)
                    .map(|day| day.slots.as_slice())
                    .unwrap_or_default(),
                &mut self.delivery_slot_index,
            ),
            _ => (
                self.collection_days
                    .get(self.collection_day_index)
                    .map(|day| day.slots.as_slice())
                    .unwrap_or_default(),
                &mut self.collection_slot_index,
            ),
        }
    }

    /// Open the slot list for the highlighted day, if anything on it is bookable.
    pub(crate) fn open_day(&mut self) {
        let (day, next) = match self.screen {
            Screen::CollectionDate => (self.collection_day(), Screen::CollectionSlot),
            Screen::DeliveryDate => (self.delivery_day(), Screen::DeliverySlot),
            _ => return,
        };

        let Some(day) = day else {
            self.error_message = Some("No days loaded yet (press r to reload)".into());
            return;
        };
        if !day.has_availability() {
            self.error_message = Some(format!("{} is fully booked", day.label));
            return;
        }

        let first_open = day.slots.iter().position(TimeSlot::is_available).unwrap_or(0);
        match next {
            Screen::CollectionSlot => self.collection_slot_index = first_open,
            _ => self.delivery_slot_index = first_open,
        }
        self.error_message = None;
        self.screen = next;
    }

    /// Record the highlighted slot as the choice for the current step.
    ///
    /// Returns `false` (with a status message) when the slot cannot be booked.
    pub(crate) fn choose_slot(&mut self) -> bool {
        let (day, index) = match self.screen {
            Screen::CollectionSlot => (self.collection_day(), self.collection_slot_index),
            Screen::DeliverySlot => (self.delivery_day(), self.delivery_slot_index),
            _ => return false,
        };
        let Some(day) = day else {
            return false;
        };
        let Some(slot) = day.slots.get(index) else {
            return false;
        };
        if !slot.is_available() {
            self.error_message = Some(format!("{} is not available", slot.label()));
            return false;
        }

        let choice = Choice {
            date: day.calendar_date(),
            range: *slot.range(),
        };
        match self.screen {
            Screen::CollectionSlot => self.collection = Some(choice),
            _ => self.delivery = Some(choice),
        }
        self.error_message = None;
        true
    }

    pub(crate) fn schedule_request(&self) -> Option<ScheduleRequest> {
        let collection = self.collection?;
        let delivery = self.delivery?;
        Some(ScheduleRequest {
            collection_date: collection.date,
            collection_time: collection.range,
            delivery_date: delivery.date,
            delivery_time: delivery.range,
        })
    }

    pub(crate) fn go_back(&mut self) {
        self.error_message = None;
        self.screen = match self.screen {
            Screen::CollectionDate | Screen::CollectionSlot => Screen::CollectionDate,
            Screen::DeliveryDate => Screen::CollectionSlot,
            Screen::DeliverySlot => Screen::DeliveryDate,
            Screen::Summary => Screen::DeliverySlot,
        };
    }
}

pub(crate) fn move_cursor(index: &mut usize, len: usize, down: bool) {
    if down {
        if *index + 1 < len {
            *index += 1;
        }
    } else if *index > 0 {
        *index -= 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use washday_core::{InMemoryBookings, ScheduleCalculator, SchedulePolicy};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn slot(value: &str, is_available: bool) -> TimeSlot {
        TimeSlot::new(SlotRange::parse(value).unwrap()).with_availability(is_available)
    }

    fn app() -> App {
        let calculator = ScheduleCalculator::new(SchedulePolicy::default()).unwrap();
        let service = SchedulingService::new(calculator, Arc::new(InMemoryBookings::default()));
        App::new(Arc::new(service))
    }

    #[test]
    fn cursor_stays_within_bounds() {
        let mut index = 0;
        move_cursor(&mut index, 2, false);
        assert_eq!(index, 0);
        move_cursor(&mut index, 2, true);
        move_cursor(&mut index, 2, true);
        assert_eq!(index, 1);
    }

    #[test]
    fn fully_booked_days_are_skipped_and_cannot_be_opened() {
        let mut app = app();
        app.set_collection_days(vec![
            DateSlot::new(date(20), date(20), vec![slot("18:00 - 20:00", false)]),
            DateSlot::new(date(21), date(20), vec![slot("08:00 - 11:00", true)]),
        ]);
        assert_eq!(app.collection_day_index, 1);

        app.collection_day_index = 0;
        app.open_day();
        assert_eq!(app.screen, Screen::CollectionDate);
        assert_eq!(app.error_message.as_deref(), Some("Today is fully booked"));
    }

    #[test]
    fn choosing_both_slots_builds_a_request() {
        let mut app = app();
        app.set_collection_days(vec![DateSlot::new(
            date(21),
            date(20),
            vec![slot("08:00 - 11:00", false), slot("11:00 - 14:00", true)],
        )]);

        app.open_day();
        assert_eq!(app.screen, Screen::CollectionSlot);
        assert_eq!(app.collection_slot_index, 1);
        assert!(app.choose_slot());

        app.set_delivery_days(vec![DateSlot::new(
            date(22),
            date(20),
            vec![slot("11:00 - 14:00", true)],
        )]);
        app.open_day();
        assert!(app.choose_slot());

        let request = app.schedule_request().unwrap();
        assert_eq!(request.collection_date, date(21));
        assert_eq!(request.collection_time.value(), "11:00 - 14:00");
        assert_eq!(request.delivery_date, date(22));

        app.go_back();
        assert_eq!(app.screen, Screen::DeliveryDate);
    }

    #[test]
    fn unavailable_slots_are_refused() {
        let mut app = app();
        app.set_collection_days(vec![DateSlot::new(
            date(21),
            date(20),
            vec![slot("08:00 - 11:00", false), slot("11:00 - 14:00", true)],
        )]);
        app.open_day();
        app.collection_slot_index = 0;

        assert!(!app.choose_slot());
        assert!(app.collection.is_none());
        assert_eq!(
            app.error_message.as_deref(),
            Some("8:00 am - 11:00 am is not available")
        );
    }
}
