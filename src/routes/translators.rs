//! Translator listing route handlers

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::models::Translator;
use crate::AppState;

/// Translator routes, mounted under `/api/translators`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(detail))
}

/// All listing cards
async fn list(State(state): State<AppState>) -> Json<Vec<Translator>> {
    Json(state.directory.list().to_vec())
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Translator>> {
    let translator = state.directory.get(&id)?;
    tracing::debug!("Translator lookup: {}", translator.name);
    Ok(Json(translator.clone()))
}
