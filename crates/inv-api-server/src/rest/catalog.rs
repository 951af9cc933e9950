//! Category and status handlers.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{BulkDeleteRequest, BulkDeleteResponse, Category, NewCategory, Status};
use tracing::instrument;

use super::{body, id, AppState};
use crate::domain::ServerError;

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.list_categories())
}

#[instrument(skip_all)]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ServerError> {
    let category = state.store.create_category(body(payload)?)?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip_all)]
pub async fn delete_category_objects(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, ServerError> {
    let category_id = id(path)?;
    let request = body(payload)?;
    state.authorize(&request)?;
    let deleted = state
        .store
        .delete_objects_in_category(category_id, request.comment)?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

#[instrument(skip(state))]
pub async fn list_statuses(State(state): State<AppState>) -> Json<Vec<Status>> {
    Json(state.store.list_statuses())
}
