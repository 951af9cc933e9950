//! `/api/zones` handlers.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared_types::{BulkDeleteRequest, BulkDeleteResponse, MessageBody, NewZone, Zone};
use tracing::instrument;

use super::{body, id, AppState};
use crate::domain::ServerError;

#[instrument(skip(state))]
pub async fn list_zones(State(state): State<AppState>) -> Json<Vec<Zone>> {
    Json(state.store.list_zones())
}

#[instrument(skip_all)]
pub async fn create_zone(
    State(state): State<AppState>,
    payload: Result<Json<NewZone>, JsonRejection>,
) -> Result<(StatusCode, Json<Zone>), ServerError> {
    let zone = state.store.create_zone(body(payload)?)?;
    Ok((StatusCode::CREATED, Json(zone)))
}

/// Fails with 409 while the zone still holds objects.
#[instrument(skip(state))]
pub async fn delete_zone(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageBody>, ServerError> {
    let zone_id = id(path)?;
    state.store.delete_zone(zone_id)?;
    Ok(Json(MessageBody {
        message: format!("Zone {} deleted", zone_id),
    }))
}

#[instrument(skip_all)]
pub async fn delete_zone_objects(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, ServerError> {
    let zone_id = id(path)?;
    let request = body(payload)?;
    state.authorize(&request)?;
    let deleted = state.store.delete_objects_in_zone(zone_id, request.comment)?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
