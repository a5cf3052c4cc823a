//! HTTP route handlers outside the booking engine

pub mod translators;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::cache::FlowCacheStats;
use crate::AppState;

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub translators: usize,
    pub flows: FlowCacheStats,
}

/// Liveness check with a glance at in-memory state
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        translators: state.directory.len(),
        flows: state.flows.stats(),
    })
}
