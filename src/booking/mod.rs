//! Booking engine module.
//!
//! Prices and validates translator session bookings. `calculators` holds the
//! pure evaluator; `services` the booking flow and reservation handoff;
//! `routes` exposes both over HTTP/JSON to the booking form.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{evaluate, format_price, price_summary};
pub use models::{
    BookingDraft, BookingEvaluation, BookingRequest, SessionChannel, SessionDuration, TimeSlot,
    TranslatorOffering,
};
pub use routes::router;
pub use services::{
    validate_draft, validate_offering, BookingError, BookingFlow, FlowState,
    LoggingReservationBackend, ReservationBackend, SubmissionOutcome,
};
