//! `/api/objects` handlers.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{
    BulkDeleteRequest, BulkDeleteResponse, InventoryObject, MessageBody, NewObject, ObjectUpdate,
};
use tracing::instrument;

use super::{body, id, AppState};
use crate::domain::ServerError;

#[instrument(skip(state))]
pub async fn list_objects(State(state): State<AppState>) -> Json<Vec<InventoryObject>> {
    Json(state.store.list_objects())
}

#[instrument(skip(state))]
pub async fn get_object(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<InventoryObject>, ServerError> {
    let object = state.store.get_object(id(path)?)?;
    Ok(Json(object))
}

#[instrument(skip_all)]
pub async fn create_object(
    State(state): State<AppState>,
    payload: Result<Json<NewObject>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryObject>), ServerError> {
    let object = state.store.create_object(body(payload)?)?;
    Ok((StatusCode::CREATED, Json(object)))
}

#[instrument(skip_all)]
pub async fn update_object(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ObjectUpdate>, JsonRejection>,
) -> Result<Json<InventoryObject>, ServerError> {
    let object_id = id(path)?;
    let object = state.store.update_object(object_id, body(payload)?)?;
    Ok(Json(object))
}

#[instrument(skip(state))]
pub async fn delete_object(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageBody>, ServerError> {
    let object_id = id(path)?;
    state.store.delete_object(object_id)?;
    Ok(Json(MessageBody {
        message: format!("Object {} deleted", object_id),
    }))
}

#[instrument(skip_all)]
pub async fn delete_all_objects(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, ServerError> {
    let request = body(payload)?;
    state.authorize(&request)?;
    let deleted = state.store.delete_all_objects(request.comment);
    Ok(Json(BulkDeleteResponse { deleted }))
}
