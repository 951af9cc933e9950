//! REST handlers for the `/api` routes.

pub mod catalog;
pub mod history;
pub mod objects;
pub mod zones;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::Path,
    routing::{delete, get},
    Json, Router,
};
use serde::de::DeserializeOwned;
use shared_types::BulkDeleteRequest;

use crate::domain::{AdminPassword, InventoryStore, ServerError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InventoryStore>,
    pub admin: Arc<AdminPassword>,
}

impl AppState {
    pub fn new(store: Arc<InventoryStore>, admin: AdminPassword) -> Self {
        Self {
            store,
            admin: Arc::new(admin),
        }
    }

    /// Reject a bulk request whose password does not match.
    pub(crate) fn authorize(&self, request: &BulkDeleteRequest) -> Result<(), ServerError> {
        if self.admin.verify(&request.password) {
            Ok(())
        } else {
            Err(ServerError::Unauthorized)
        }
    }
}

/// Build the `/api` router.
///
/// `/api/objects/all` is a static segment and wins over `/api/objects/:id`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/objects",
            get(objects::list_objects).post(objects::create_object),
        )
        .route("/api/objects/all", delete(objects::delete_all_objects))
        .route(
            "/api/objects/:id",
            get(objects::get_object)
                .put(objects::update_object)
                .delete(objects::delete_object),
        )
        .route("/api/zones", get(zones::list_zones).post(zones::create_zone))
        .route("/api/zones/:id", delete(zones::delete_zone))
        .route("/api/zones/:id/objects", delete(zones::delete_zone_objects))
        .route(
            "/api/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/api/categories/:id/objects",
            delete(catalog::delete_category_objects),
        )
        .route("/api/statuses", get(catalog::list_statuses))
        .route(
            "/api/history",
            get(history::list_history).post(history::append_history),
        )
        .with_state(state)
}

/// Unwrap a JSON body, turning rejections into `{ "error": ... }` responses.
pub(crate) fn body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ServerError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}

/// Unwrap a numeric path id.
pub(crate) fn id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ServerError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))
}
