//! Response DTOs for booking API endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{format_price, price_summary};
use super::models::{BookingDraft, BookingEvaluation, SessionChannel, SessionDuration, TimeSlot};
use super::services::{BookingFlow, FlowState, SubmissionOutcome};

/// Evaluation plus the strings the price box displays
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub is_submittable: bool,
    pub total_price: f64,
    pub display_price: String,
    pub summary: String,
}

impl EvaluationResponse {
    pub fn new(
        evaluation: BookingEvaluation,
        duration: SessionDuration,
        price_per_hour: f64,
        currency_symbol: &str,
    ) -> Self {
        Self {
            is_submittable: evaluation.is_submittable,
            total_price: evaluation.total_price,
            display_price: format_price(evaluation.total_price, currency_symbol),
            summary: price_summary(duration, price_per_hour, currency_symbol),
        }
    }
}

/// Current state of an open booking flow
#[derive(Debug, Serialize)]
pub struct FlowResponse {
    pub id: Uuid,
    pub translator_id: String,
    pub state: FlowState,
    pub draft: BookingDraft,
    pub evaluation: EvaluationResponse,
}

impl FlowResponse {
    pub fn new(flow: &BookingFlow, currency_symbol: &str) -> Self {
        Self {
            id: flow.id,
            translator_id: flow.offering.id.clone(),
            state: flow.state(),
            draft: flow.draft().clone(),
            evaluation: EvaluationResponse::new(
                flow.evaluation(),
                flow.draft().duration,
                flow.offering.price_per_hour,
                currency_symbol,
            ),
        }
    }
}

/// Response for a confirmed booking
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub reference: Uuid,
    pub translator_id: String,
    pub draft: BookingDraft,
    pub total_price: f64,
    pub display_price: String,
    pub message: String,
}

impl SubmissionResponse {
    pub fn new(outcome: SubmissionOutcome, currency_symbol: &str) -> Self {
        let request = outcome.request;
        Self {
            reference: request.reference,
            translator_id: request.translator_id,
            display_price: format_price(request.evaluation.total_price, currency_symbol),
            total_price: request.evaluation.total_price,
            draft: request.draft,
            message: outcome.message,
        }
    }
}

/// A session length the form offers
#[derive(Debug, Serialize)]
pub struct DurationOption {
    pub minutes: u32,
    pub label: &'static str,
}

/// Choices the booking form offers
#[derive(Debug, Serialize)]
pub struct BookingOptionsResponse {
    pub time_slots: Vec<TimeSlot>,
    pub durations: Vec<DurationOption>,
    pub channels: Vec<SessionChannel>,
    pub default_duration: u32,
    pub default_channel: SessionChannel,
    pub min_date: NaiveDate,
    pub currency_symbol: String,
}

impl BookingOptionsResponse {
    pub fn new(today: NaiveDate, currency_symbol: &str) -> Self {
        Self {
            time_slots: TimeSlot::ALL.to_vec(),
            durations: SessionDuration::ALL
                .iter()
                .map(|d| DurationOption {
                    minutes: d.minutes(),
                    label: d.label(),
                })
                .collect(),
            channels: SessionChannel::ALL.to_vec(),
            default_duration: SessionDuration::default().minutes(),
            default_channel: SessionChannel::default(),
            min_date: today,
            currency_symbol: currency_symbol.to_string(),
        }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
