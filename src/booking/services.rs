//! Booking flow and reservation handoff.
//!
//! The evaluator in `calculators` never fails; everything that can reject a
//! booking (bad rate, past date, missing fields) lives here, on the caller
//! side, and blocks submission instead of failing the price preview.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::calculators::evaluate;
use super::models::{BookingDraft, BookingEvaluation, BookingRequest, TranslatorOffering};

/// Message returned to the user once a booking is confirmed
pub const CONFIRMATION_MESSAGE: &str =
    "Réservation confirmée ! Vous recevrez un email de confirmation.";

/// Booking validation and flow errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid duration: {0} minutes is not an offered session length")]
    InvalidDuration(u32),

    #[error("Invalid rate: {0} is not a finite, non-negative hourly price")]
    InvalidRate(f64),

    #[error("Unknown time slot: {0:?}")]
    UnknownTimeSlot(String),

    #[error("Unknown session channel: {0:?}")]
    UnknownChannel(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Date {date} is in the past (today is {today})")]
    DateInPast { date: NaiveDate, today: NaiveDate },

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Booking flow is not open")]
    FlowClosed,

    #[error("Reservation failed: {0}")]
    ReservationFailed(String),
}

/// Reject rates the price formula cannot sensibly use.
pub fn validate_offering(offering: &TranslatorOffering) -> Result<(), BookingError> {
    if !offering.price_per_hour.is_finite() || offering.price_per_hour < 0.0 {
        return Err(BookingError::InvalidRate(offering.price_per_hour));
    }
    Ok(())
}

/// Check a draft is ready to become a booking request as of `today`.
pub fn validate_draft(draft: &BookingDraft, today: NaiveDate) -> Result<(), BookingError> {
    let mut missing = Vec::new();
    if draft.date.is_none() {
        missing.push("date".to_string());
    }
    if draft.time.is_none() {
        missing.push("time".to_string());
    }
    if !missing.is_empty() {
        return Err(BookingError::MissingFields(missing));
    }

    if let Some(date) = draft.date {
        if date < today {
            return Err(BookingError::DateInPast { date, today });
        }
    }

    Ok(())
}

/// Receives confirmed bookings.
pub trait ReservationBackend: Send + Sync {
    fn reserve(&self, request: &BookingRequest) -> Result<(), BookingError>;
}

/// Backend that only records the booking in the application log
#[derive(Debug, Clone, Default)]
pub struct LoggingReservationBackend;

impl ReservationBackend for LoggingReservationBackend {
    fn reserve(&self, request: &BookingRequest) -> Result<(), BookingError> {
        info!(
            reference = %request.reference,
            translator = %request.translator_id,
            date = ?request.draft.date,
            time = ?request.draft.time,
            duration = request.draft.duration.minutes(),
            channel = request.draft.channel.as_str(),
            description = %request.draft.description,
            total_price = request.evaluation.total_price,
            "Booking submitted"
        );
        Ok(())
    }
}

/// Lifecycle of a booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Open,
    Submitting,
    Closed,
}

/// Result of a confirmed submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub request: BookingRequest,
    pub message: String,
}

/// One booking form session for one translator.
///
/// Edits replace the draft wholesale. Submitting or cancelling closes the
/// flow and discards the draft.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    pub id: Uuid,
    pub offering: TranslatorOffering,
    draft: BookingDraft,
    state: FlowState,
}

impl BookingFlow {
    /// Open a flow with a fresh default draft.
    pub fn open(offering: TranslatorOffering) -> Result<Self, BookingError> {
        validate_offering(&offering)?;

        let flow = Self {
            id: Uuid::new_v4(),
            offering,
            draft: BookingDraft::default(),
            state: FlowState::Open,
        };
        debug!(flow = %flow.id, translator = %flow.offering.id, "Booking flow opened");
        Ok(flow)
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Live price and submittability for the current draft
    pub fn evaluation(&self) -> BookingEvaluation {
        evaluate(&self.draft, &self.offering)
    }

    /// Replace the draft with the latest form values.
    pub fn edit(&mut self, draft: BookingDraft) -> Result<BookingEvaluation, BookingError> {
        if self.state != FlowState::Open {
            return Err(BookingError::FlowClosed);
        }
        self.draft = draft;
        Ok(self.evaluation())
    }

    /// Discard the draft and close the flow. Always allowed.
    pub fn cancel(&mut self) {
        if self.state != FlowState::Closed {
            debug!(flow = %self.id, "Booking flow cancelled");
        }
        self.draft = BookingDraft::default();
        self.state = FlowState::Closed;
    }

    /// Validate the draft, hand it to the reservation backend and close.
    ///
    /// Validation failures leave the flow open so the user can fix the form.
    /// A backend failure also reopens the flow.
    pub fn submit(
        &mut self,
        today: NaiveDate,
        backend: &dyn ReservationBackend,
    ) -> Result<SubmissionOutcome, BookingError> {
        if self.state != FlowState::Open {
            return Err(BookingError::FlowClosed);
        }

        let evaluation = self.evaluation();
        validate_draft(&self.draft, today)?;
        debug_assert!(evaluation.is_submittable);

        self.state = FlowState::Submitting;
        let request = BookingRequest {
            reference: Uuid::new_v4(),
            translator_id: self.offering.id.clone(),
            draft: self.draft.clone(),
            evaluation,
        };

        if let Err(e) = backend.reserve(&request) {
            warn!(flow = %self.id, "Reservation backend rejected booking: {}", e);
            self.state = FlowState::Open;
            return Err(e);
        }

        self.draft = BookingDraft::default();
        self.state = FlowState::Closed;

        Ok(SubmissionOutcome {
            request,
            message: CONFIRMATION_MESSAGE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::{SessionDuration, TimeSlot};
    use std::sync::Mutex;

    /// Records every request it receives
    #[derive(Default)]
    struct RecordingBackend {
        requests: Mutex<Vec<BookingRequest>>,
    }

    impl ReservationBackend for RecordingBackend {
        fn reserve(&self, request: &BookingRequest) -> Result<(), BookingError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    struct FailingBackend;

    impl ReservationBackend for FailingBackend {
        fn reserve(&self, _request: &BookingRequest) -> Result<(), BookingError> {
            Err(BookingError::ReservationFailed("calendar unavailable".to_string()))
        }
    }

    fn offering() -> TranslatorOffering {
        TranslatorOffering {
            id: "1".to_string(),
            price_per_hour: 75.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            date: Some(today()),
            time: Some(TimeSlot::Fourteen),
            duration: SessionDuration::TwoHours,
            description: "Traduction d'un acte notarié".to_string(),
            ..Default::default()
        }
    }

    // ==================== validation tests ====================

    #[test]
    fn test_validate_offering_rejects_bad_rates() {
        for rate in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let offering = TranslatorOffering {
                id: "x".to_string(),
                price_per_hour: rate,
            };
            assert!(matches!(
                validate_offering(&offering),
                Err(BookingError::InvalidRate(_))
            ));
        }
        assert!(validate_offering(&offering()).is_ok());
    }

    #[test]
    fn test_validate_draft_reports_missing_fields() {
        let err = validate_draft(&BookingDraft::default(), today()).unwrap_err();
        assert_eq!(
            err,
            BookingError::MissingFields(vec!["date".to_string(), "time".to_string()])
        );
        assert!(err.to_string().contains("date, time"));
    }

    #[test]
    fn test_validate_draft_rejects_past_date() {
        let draft = BookingDraft {
            date: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..complete_draft()
        };
        assert!(matches!(
            validate_draft(&draft, today()),
            Err(BookingError::DateInPast { .. })
        ));
    }

    #[test]
    fn test_validate_draft_accepts_today() {
        assert!(validate_draft(&complete_draft(), today()).is_ok());
    }

    // ==================== flow tests ====================

    #[test]
    fn test_open_starts_fresh() {
        let flow = BookingFlow::open(offering()).unwrap();
        assert_eq!(flow.state(), FlowState::Open);
        assert_eq!(flow.draft(), &BookingDraft::default());
        assert!(!flow.evaluation().is_submittable);
        assert_eq!(flow.evaluation().total_price, 37.5);
    }

    #[test]
    fn test_open_rejects_negative_rate() {
        let offering = TranslatorOffering {
            id: "1".to_string(),
            price_per_hour: -10.0,
        };
        assert_eq!(
            BookingFlow::open(offering).unwrap_err(),
            BookingError::InvalidRate(-10.0)
        );
    }

    #[test]
    fn test_edit_updates_live_evaluation() {
        let mut flow = BookingFlow::open(offering()).unwrap();
        let evaluation = flow.edit(complete_draft()).unwrap();
        assert!(evaluation.is_submittable);
        assert_eq!(evaluation.total_price, 150.0);
    }

    #[test]
    fn test_submit_incomplete_draft_keeps_flow_open() {
        let backend = RecordingBackend::default();
        let mut flow = BookingFlow::open(offering()).unwrap();

        let err = flow.submit(today(), &backend).unwrap_err();
        assert!(matches!(err, BookingError::MissingFields(_)));
        assert_eq!(flow.state(), FlowState::Open);
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_hands_request_to_backend_and_closes() {
        let backend = RecordingBackend::default();
        let mut flow = BookingFlow::open(offering()).unwrap();
        flow.edit(complete_draft()).unwrap();

        let outcome = flow.submit(today(), &backend).unwrap();

        assert_eq!(outcome.message, CONFIRMATION_MESSAGE);
        assert_eq!(outcome.request.translator_id, "1");
        assert_eq!(outcome.request.draft, complete_draft());
        assert_eq!(outcome.request.evaluation.total_price, 150.0);
        assert_eq!(flow.state(), FlowState::Closed);
        assert_eq!(flow.draft(), &BookingDraft::default());

        let recorded = backend.requests.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].reference, outcome.request.reference);
    }

    #[test]
    fn test_backend_failure_reopens_flow() {
        let mut flow = BookingFlow::open(offering()).unwrap();
        flow.edit(complete_draft()).unwrap();

        let err = flow.submit(today(), &FailingBackend).unwrap_err();
        assert!(matches!(err, BookingError::ReservationFailed(_)));
        assert_eq!(flow.state(), FlowState::Open);
        assert_eq!(flow.draft(), &complete_draft());
    }

    #[test]
    fn test_closed_flow_rejects_edits_and_submits() {
        let mut flow = BookingFlow::open(offering()).unwrap();
        flow.edit(complete_draft()).unwrap();
        flow.cancel();

        assert_eq!(flow.state(), FlowState::Closed);
        assert_eq!(flow.draft(), &BookingDraft::default());
        assert_eq!(flow.edit(complete_draft()).unwrap_err(), BookingError::FlowClosed);
        assert_eq!(
            flow.submit(today(), &LoggingReservationBackend).unwrap_err(),
            BookingError::FlowClosed
        );
    }

    #[test]
    fn test_cancel_is_always_available() {
        let mut flow = BookingFlow::open(offering()).unwrap();
        flow.cancel();
        flow.cancel();
        assert_eq!(flow.state(), FlowState::Closed);
    }
}
