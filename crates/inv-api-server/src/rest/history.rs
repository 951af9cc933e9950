//! `/api/history` handlers.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use shared_types::{HistoryEntry, NewHistoryEntry};
use tracing::instrument;

use super::{body, AppState};
use crate::domain::ServerError;

/// Newest entries first.
#[instrument(skip(state))]
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.store.list_history())
}

#[instrument(skip_all)]
pub async fn append_history(
    State(state): State<AppState>,
    payload: Result<Json<NewHistoryEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<HistoryEntry>), ServerError> {
    let entry = state.store.append_history(body(payload)?);
    Ok((StatusCode::CREATED, Json(entry)))
}
