//! Booking API route handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::evaluate;
use super::requests::{BookingFormRequest, EvaluateBookingRequest, OpenFlowRequest};
use super::responses::{BookingOptionsResponse, EvaluationResponse, FlowResponse, SubmissionResponse};
use super::services::{validate_offering, BookingFlow};

/// Booking routes, mounted under `/api/booking`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/options", get(options))
        .route("/evaluate", post(evaluate_booking))
        .route("/flows", post(open_flow))
        .route("/flows/:id", get(get_flow).put(update_flow).delete(cancel_flow))
        .route("/flows/:id/submit", post(submit_flow))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Choices offered by the booking form
async fn options(State(state): State<AppState>) -> Json<BookingOptionsResponse> {
    Json(BookingOptionsResponse::new(today(), &state.config.currency_symbol))
}

/// Stateless live price preview
async fn evaluate_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EvaluateBookingRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse>> {
    let Json(request) = payload?;
    let offering = state.directory.get(&request.translator_id)?.offering();
    validate_offering(&offering)?;

    let draft = request.form.into_draft()?;
    let evaluation = evaluate(&draft, &offering);

    Ok(Json(EvaluationResponse::new(
        evaluation,
        draft.duration,
        offering.price_per_hour,
        &state.config.currency_symbol,
    )))
}

async fn open_flow(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OpenFlowRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FlowResponse>)> {
    let Json(request) = payload?;
    let offering = state.directory.get(&request.translator_id)?.offering();
    let flow = BookingFlow::open(offering)?;
    let response = FlowResponse::new(&flow, &state.config.currency_symbol);
    state.flows.put(flow).await;

    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_flow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlowResponse>> {
    let flow = state.flows.get(id).await.ok_or(AppError::FlowNotFound(id))?;
    Ok(Json(FlowResponse::new(&flow, &state.config.currency_symbol)))
}

/// Replace the flow's draft with the posted form values
async fn update_flow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: std::result::Result<Json<BookingFormRequest>, JsonRejection>,
) -> Result<Json<FlowResponse>> {
    let Json(form) = payload?;
    let draft = form.into_draft()?;
    let currency_symbol = &state.config.currency_symbol;

    let response = state
        .flows
        .update(id, |flow| {
            flow.edit(draft)?;
            Ok(FlowResponse::new(flow, currency_symbol))
        })
        .await
        .ok_or(AppError::FlowNotFound(id))??;

    Ok(Json(response))
}

async fn submit_flow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionResponse>> {
    let backend = state.backend.as_ref();

    let outcome = state
        .flows
        .update(id, |flow| flow.submit(today(), backend))
        .await
        .ok_or(AppError::FlowNotFound(id))??;

    info!(
        flow = %id,
        reference = %outcome.request.reference,
        "Booking confirmed"
    );

    Ok(Json(SubmissionResponse::new(
        outcome,
        &state.config.currency_symbol,
    )))
}

async fn cancel_flow(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state
        .flows
        .update(id, |flow| {
            flow.cancel();
            Ok(())
        })
        .await
        .ok_or(AppError::FlowNotFound(id))??;

    Ok(StatusCode::NO_CONTENT)
}
