//! Error types shared by the calculator, the model parsers, and the service.

use chrono::ParseError as ChronoParseError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Malformed input rejected at the parse boundary.
pub enum ScheduleError {
    /// A time or time range did not match `HH:MM` or `HH:MM - HH:MM`.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
    /// A calendar date could not be parsed.
    #[error("Invalid date '{input}': {source}")]
    InvalidDate {
        /// Text that failed to parse.
        input: String,
        /// Underlying chrono error.
        source: ChronoParseError,
    },
    /// Slot generation parameters cannot produce a slot grid.
    #[error("Invalid slot configuration: {0}")]
    InvalidSlotConfig(String),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Reason a well-formed collection and delivery pair is not bookable.
///
/// Only the first failing check is reported.
pub enum ScheduleViolation {
    /// Collection falls on a day before today.
    #[error("Collection date cannot be in the past")]
    CollectionInPast,
    /// Delivery does not start strictly after collection.
    #[error("Delivery date must be after collection date")]
    DeliveryBeforeCollection,
    /// Delivery starts before the processing turnaround has elapsed.
    #[error("Minimum {processing_hours} hours required between collection and delivery")]
    InsufficientProcessingTime {
        /// Turnaround the policy requires.
        processing_hours: u32,
    },
}
