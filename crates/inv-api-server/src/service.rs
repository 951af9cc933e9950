//! Inventory service - main entry point.
//!
//! Owns the store and the admin credential, builds the router and serves it.

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{AdminPassword, InventoryStore, ServerConfig, ServiceError};
use crate::rest::{api_router, AppState};

/// Inventory REST service
pub struct InventoryService {
    config: ServerConfig,
    state: AppState,
}

impl InventoryService {
    /// Create a new service, seeding the store from configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        let admin = AdminPassword::from_hex(&config.admin.password_sha256)?;
        if config.admin.uses_default_password() {
            warn!("Bulk deletes are protected by the default admin password; set INV_ADMIN_PASSWORD");
        }
        let store = Arc::new(InventoryStore::seeded(&config.seed));
        let state = AppState::new(store, admin);

        Ok(Self { config, state })
    }

    /// Handle to the backing store.
    pub fn store(&self) -> Arc<InventoryStore> {
        Arc::clone(&self.state.store)
    }

    /// Build the full router: `/health`, `/api/*` and request tracing.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServiceError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr).await.map_err(ServiceError::Bind)?;
        info!(addr = %addr, "Starting inventory API server");
        serve(listener, self.router(), shutdown).await
    }
}

/// Router over an existing state.
pub fn build_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    Router::new()
        .route("/health", get(health_check))
        .merge(api_router(state))
        .layer(middleware)
}

/// Serve a router on a bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServiceError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServiceError::Serve)?;
    info!("Inventory API server stopped");
    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use shared_types::{BulkDeleteRequest, ErrorBody, InventoryObject, NewCategory, NewObject, NewZone};
    use tower::ServiceExt;

    fn router() -> Router {
        InventoryService::new(ServerConfig::default())
            .unwrap()
            .router()
    }

    fn json_request(method: &str, uri: &str, body: &impl serde::Serialize) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_object_returns_created() {
        let response = router()
            .oneshot(json_request("POST", "/api/objects", &NewObject::named("Router")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let object: InventoryObject = read_json(response).await;
        assert_eq!(object.name, "Router");
    }

    #[tokio::test]
    async fn test_missing_object_has_error_body() {
        let response = router()
            .oneshot(Request::get("/api/objects/404").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = read_json(response).await;
        assert_eq!(body.error, "Object 404 not found");
    }

    #[tokio::test]
    async fn test_malformed_body_has_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/zones")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = read_json(response).await;
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_zone_is_conflict() {
        let zone = NewZone { name: "Zona Soldadura".into() };
        let response = router()
            .oneshot(json_request("POST", "/api/zones", &zone))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: ErrorBody = read_json(response).await;
        assert_eq!(body.error, "A zone with this name already exists");
    }

    #[tokio::test]
    async fn test_duplicate_category_is_conflict() {
        let router = router();
        let category = NewCategory { name: "Tools".into() };

        let first = router
            .clone()
            .oneshot(json_request("POST", "/api/categories", &category))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router
            .oneshot(json_request("POST", "/api/categories", &category))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body: ErrorBody = read_json(second).await;
        assert_eq!(body.error, "A category with this name already exists");
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_password() {
        let request = BulkDeleteRequest {
            password: "wrong".into(),
            comment: None,
        };
        let response = router()
            .oneshot(json_request("DELETE", "/api/objects/all", &request))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorBody = read_json(response).await;
        assert_eq!(body.error, "Invalid password");
    }

    #[tokio::test]
    async fn test_delete_all_route_is_not_captured_by_id_route() {
        let request = BulkDeleteRequest {
            password: crate::domain::config::DEFAULT_ADMIN_PASSWORD.into(),
            comment: None,
        };
        let response = router()
            .oneshot(json_request("DELETE", "/api/objects/all", &request))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
