//! Core scheduling types and service wiring for the washday collection and delivery service.

/// In-memory booking store implementing the booking port.
pub mod bookings;
/// Slot generation, delivery lower bounds, validation, and grouping.
pub mod calendar;
/// Error types for malformed input and invalid schedules.
pub mod error;
/// Fixed en-GB presentation helpers.
pub mod format;
/// Time ranges, slots, and day entries exchanged with clients.
pub mod model;
/// Business rules that drive slot generation and validation.
pub mod policy;
/// Traits describing the clock and booking capabilities.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use bookings::*;
pub use calendar::*;
pub use error::*;
pub use format::*;
pub use model::*;
pub use policy::*;
pub use ports::*;
pub use service::*;
