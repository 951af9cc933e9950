//! # Integration Test Flows
//!
//! The console's HTTP client and command controller against a live backend.
//!
//! ## Flows Tested:
//!
//! 1. **Objects**: create, list, delete, double delete
//! 2. **Bulk operations**: password gate and scoping
//! 3. **Zones**: integrity conflict, deletion audit
//! 4. **Failure surfacing**: non-2xx bodies become exactly one alert

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get, Json, Router};
    use tokio::sync::Mutex;

    use inv_admin::api::{ApiError, InventoryApi};
    use inv_admin::domain::{drive, AlertKind, App, BulkScope, Command, Tab};
    use shared_types::{ActionType, BulkDeleteRequest, NewCategory, NewObject, NewZone};

    use crate::integration::harness::{client_for, spawn_router, TestServer, ADMIN_PASSWORD};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn bulk(password: &str) -> BulkDeleteRequest {
        BulkDeleteRequest {
            password: password.to_string(),
            comment: None,
        }
    }

    fn object_in_zone(name: &str, zone_id: i64) -> NewObject {
        NewObject {
            zone_id: Some(zone_id),
            ..NewObject::named(name)
        }
    }

    fn failing_router() -> Router {
        Router::new()
            .route(
                "/api/objects",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({ "error": "database is down" })),
                    )
                }),
            )
            .route(
                "/api/zones",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
            )
    }

    // =============================================================================
    // OBJECTS
    // =============================================================================

    #[tokio::test]
    async fn test_created_object_appears_in_list() {
        let server = TestServer::start().await;
        let api = server.client();

        let created = api
            .create_object(&NewObject {
                price: 120.5,
                quantity: 2,
                ..object_in_zone("Soldadora MIG", 1)
            })
            .await
            .unwrap();

        let objects = api.list_objects().await.unwrap();
        let listed = objects.iter().find(|o| o.id == created.id).unwrap();
        assert_eq!(listed.name, "Soldadora MIG");
        assert_eq!(listed.zone_name.as_deref(), Some("Zona Soldadura"));
        assert_eq!(listed.status, "Available");
    }

    #[tokio::test]
    async fn test_create_records_history_with_comment() {
        let server = TestServer::start().await;
        let api = server.client();

        api.create_object(&NewObject {
            comment: Some("new arrival".into()),
            ..NewObject::named("Fresadora")
        })
        .await
        .unwrap();

        let history = api.list_history().await.unwrap();
        let newest = &history[0];
        assert_eq!(newest.action_type, ActionType::Create);
        assert_eq!(newest.object_name.as_deref(), Some("Fresadora"));
        assert_eq!(newest.comment.as_deref(), Some("new arrival"));
    }

    #[tokio::test]
    async fn test_deleted_object_is_gone_and_second_delete_is_not_found() {
        let server = TestServer::start().await;
        let api = server.client();
        let created = api.create_object(&NewObject::named("Taladro")).await.unwrap();

        api.delete_object(created.id).await.unwrap();

        let objects = api.list_objects().await.unwrap();
        assert!(objects.iter().all(|o| o.id != created.id));

        let err = api.delete_object(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_validation_error_message_is_surfaced() {
        let server = TestServer::start().await;
        let api = server.client();

        let err = api.create_object(&NewObject::named("   ")).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert_eq!(err.to_string(), "Please enter a name");
    }

    // =============================================================================
    // BULK OPERATIONS
    // =============================================================================

    #[tokio::test]
    async fn test_bulk_delete_wrong_password_is_unauthorized() {
        let server = TestServer::start().await;
        let api = server.client();
        api.create_object(&NewObject::named("Impresora")).await.unwrap();

        let err = api.delete_all_objects(&bulk("letmein")).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 401, .. }));
        assert_eq!(err.to_string(), "Invalid password");
        assert_eq!(api.list_objects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zone_bulk_delete_removes_only_that_zone() {
        let server = TestServer::start().await;
        let api = server.client();
        api.create_object(&object_in_zone("a", 1)).await.unwrap();
        api.create_object(&object_in_zone("b", 1)).await.unwrap();
        let kept = api.create_object(&object_in_zone("c", 2)).await.unwrap();

        let response = api.delete_zone_objects(1, &bulk(ADMIN_PASSWORD)).await.unwrap();

        assert_eq!(response.deleted, 2);
        let remaining = api.list_objects().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_category_bulk_delete_removes_only_that_category() {
        let server = TestServer::start().await;
        let api = server.client();
        let tools = api
            .create_category(&NewCategory { name: "Tools".into() })
            .await
            .unwrap();
        api.create_object(&NewObject {
            category_id: Some(tools.id),
            ..NewObject::named("Hammer")
        })
        .await
        .unwrap();
        api.create_object(&NewObject::named("Desk")).await.unwrap();

        let response = api
            .delete_category_objects(tools.id, &bulk(ADMIN_PASSWORD))
            .await
            .unwrap();

        assert_eq!(response.deleted, 1);
        let remaining = api.list_objects().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Desk");
    }

    #[tokio::test]
    async fn test_bulk_delete_unknown_zone_is_not_found() {
        let server = TestServer::start().await;
        let api = server.client();

        let err = api
            .delete_zone_objects(999, &bulk(ADMIN_PASSWORD))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    // =============================================================================
    // ZONES
    // =============================================================================

    #[tokio::test]
    async fn test_zone_with_objects_cannot_be_deleted() {
        let server = TestServer::start().await;
        let api = server.client();
        let zone = api.create_zone(&NewZone { name: "Zona Pintura".into() }).await.unwrap();
        api.create_object(&object_in_zone("Compresor", zone.id)).await.unwrap();

        let err = api.delete_zone(zone.id).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 409, .. }));
        assert!(api.list_zones().await.unwrap().iter().any(|z| z.id == zone.id));
    }

    #[tokio::test]
    async fn test_duplicate_zone_name_is_conflict() {
        let server = TestServer::start().await;
        let api = server.client();

        let err = api
            .create_zone(&NewZone { name: "Zona Soldadura".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 409, .. }));
        assert_eq!(err.to_string(), "A zone with this name already exists");
        assert_eq!(api.list_zones().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_console_created_category_scopes_bulk_delete() {
        let server = TestServer::start().await;
        let api = server.client();
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::CreateCategory(NewCategory { name: "Tools".into() })).await;
        let tools = app.lock().await.reference.categories[0].id;
        api.create_object(&NewObject {
            category_id: Some(tools),
            ..NewObject::named("Hammer")
        })
        .await
        .unwrap();

        drive(
            &api,
            &app,
            Command::BulkDelete {
                scope: BulkScope::Category(tools),
                request: bulk(ADMIN_PASSWORD),
            },
        )
        .await;

        assert!(api.list_objects().await.unwrap().is_empty());
        let history = api.list_history().await.unwrap();
        assert_eq!(
            history[0].comment.as_deref(),
            Some("Deleted 1 objects in category Tools")
        );
        assert_eq!(app.lock().await.alerts.count(AlertKind::Danger), 0);
    }

    #[tokio::test]
    async fn test_console_zone_delete_is_audited() {
        let server = TestServer::start().await;
        let api = server.client();
        let app = Mutex::new(App::new());

        drive(
            &api,
            &app,
            Command::DeleteZone {
                id: 4,
                name: "Zona del laser".into(),
            },
        )
        .await;

        let history = api.list_history().await.unwrap();
        let newest = &history[0];
        assert_eq!(newest.zone_id, Some(4));
        assert_eq!(newest.zone_name.as_deref(), Some("Zona del laser"));
        assert_eq!(newest.action_type, ActionType::Delete);

        let app = app.lock().await;
        assert_eq!(app.alerts.count(AlertKind::Danger), 0);
        assert!(app.reference.zone_name(4).is_none());
    }

    // =============================================================================
    // FAILURE SURFACING
    // =============================================================================

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let (base_url, _shutdown) = spawn_router(failing_router()).await;
        let api = client_for(&base_url);

        let err = api.list_objects().await.unwrap_err();
        assert_eq!(err.to_string(), "database is down");

        let err = api.list_zones().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_failed_reload_raises_one_alert() {
        let (base_url, _shutdown) = spawn_router(failing_router()).await;
        let api = client_for(&base_url);
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::Reload(Tab::Objects)).await;

        let app = app.lock().await;
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts.count(AlertKind::Danger), 1);
        assert!(app.objects.is_empty());
    }

    #[tokio::test]
    async fn test_console_double_delete_raises_no_error() {
        let server = TestServer::start().await;
        let api = server.client();
        let created = api.create_object(&NewObject::named("Sierra")).await.unwrap();
        let app = Mutex::new(App::new());
        for command in App::startup_commands() {
            drive(&api, &app, command).await;
        }

        let delete = Command::DeleteObject {
            id: created.id,
            name: created.name.clone(),
        };
        drive(&api, &app, delete.clone()).await;
        drive(&api, &app, delete).await;

        let app = app.lock().await;
        assert_eq!(app.alerts.count(AlertKind::Danger), 0);
        assert!(app.objects.is_empty());
        assert_eq!(app.reference.zones.len(), 4);
    }
}
