//! Runs commands against the API and folds the results into the app.

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{App, BulkScope, Command, Outcome, Tab};
use crate::api::{load_reference_data, InventoryApi};

impl Command {
    /// Short name for logs; never includes request bodies.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Reload(Tab::Objects) => "reload_objects",
            Command::Reload(Tab::Zones) => "reload_zones",
            Command::Reload(Tab::History) => "reload_history",
            Command::Reload(Tab::Bulk) | Command::LoadReference => "load_reference",
            Command::FetchForEdit(_) => "fetch_for_edit",
            Command::CreateObject(_) => "create_object",
            Command::UpdateObject { .. } => "update_object",
            Command::DeleteObject { .. } => "delete_object",
            Command::AddHistory(_) => "add_history",
            Command::CreateZone(_) => "create_zone",
            Command::DeleteZone { .. } => "delete_zone",
            Command::CreateCategory(_) => "create_category",
            Command::BulkDelete { .. } => "bulk_delete",
        }
    }
}

/// Perform the IO behind one command.
pub async fn perform<A>(api: &A, command: Command) -> Outcome
where
    A: InventoryApi + ?Sized,
{
    match command {
        Command::Reload(Tab::Objects) => Outcome::Objects(api.list_objects().await),
        Command::Reload(Tab::Zones) => Outcome::Zones(api.list_zones().await),
        Command::Reload(Tab::History) => Outcome::History(api.list_history().await),
        Command::Reload(Tab::Bulk) | Command::LoadReference => {
            Outcome::Reference(load_reference_data(api).await)
        }
        Command::FetchForEdit(id) => Outcome::ObjectForEdit(api.get_object(id).await),
        Command::CreateObject(object) => Outcome::ObjectCreated(api.create_object(&object).await),
        Command::UpdateObject { id, update } => {
            Outcome::ObjectUpdated(api.update_object(id, &update).await)
        }
        Command::DeleteObject { id, name } => Outcome::ObjectDeleted {
            id,
            name,
            result: api.delete_object(id).await,
        },
        Command::AddHistory(entry) => Outcome::HistoryAdded(api.add_history(&entry).await),
        Command::CreateZone(zone) => Outcome::ZoneCreated(api.create_zone(&zone).await),
        Command::DeleteZone { id, name } => Outcome::ZoneDeleted {
            id,
            name,
            result: api.delete_zone(id).await,
        },
        Command::CreateCategory(category) => {
            Outcome::CategoryCreated(api.create_category(&category).await)
        }
        Command::BulkDelete { scope, request } => {
            let result = match scope {
                BulkScope::All => api.delete_all_objects(&request).await,
                BulkScope::Zone(zone_id) => api.delete_zone_objects(zone_id, &request).await,
                BulkScope::Category(category_id) => {
                    api.delete_category_objects(category_id, &request).await
                }
            };
            Outcome::BulkDeleted { scope, result }
        }
    }
}

/// Run `command` and every follow-up it produces, in order.
///
/// The app lock is only taken to apply an outcome, never across a request.
pub async fn drive<A>(api: &A, app: &Mutex<App>, command: Command)
where
    A: InventoryApi + ?Sized,
{
    let mut queue = VecDeque::from([command]);
    while let Some(command) = queue.pop_front() {
        let name = command.name();
        debug!(command = name, "Performing command");

        let outcome = perform(api, command).await;
        if let Some(e) = outcome_error(&outcome) {
            warn!(command = name, error = %e, "Command failed");
        }

        let follow_ups = app.lock().await.apply(outcome);
        queue.extend(follow_ups);
    }
}

fn outcome_error(outcome: &Outcome) -> Option<&crate::api::ApiError> {
    match outcome {
        Outcome::Objects(r) => r.as_ref().err(),
        Outcome::Zones(r) => r.as_ref().err(),
        Outcome::History(r) => r.as_ref().err(),
        Outcome::Reference(r) => r.as_ref().err(),
        Outcome::ObjectForEdit(r) | Outcome::ObjectCreated(r) | Outcome::ObjectUpdated(r) => {
            r.as_ref().err()
        }
        Outcome::ObjectDeleted { result, .. } | Outcome::ZoneDeleted { result, .. } => {
            result.as_ref().err()
        }
        Outcome::HistoryAdded(r) => r.as_ref().err(),
        Outcome::ZoneCreated(r) => r.as_ref().err(),
        Outcome::CategoryCreated(r) => r.as_ref().err(),
        Outcome::BulkDeleted { result, .. } => result.as_ref().err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use shared_types::{
        ActionType, BulkDeleteRequest, BulkDeleteResponse, Category, HistoryEntry,
        InventoryObject, NewCategory, NewHistoryEntry, NewObject, NewZone, ObjectUpdate, Status,
        Zone,
    };

    use crate::api::ApiError;
    use crate::domain::{AlertKind, Key};

    // =========================================================================
    // FAKE API
    // =========================================================================

    #[derive(Default)]
    struct FakeApi {
        fail_lists: bool,
        deleted: std::sync::Mutex<HashSet<i64>>,
        list_objects_calls: AtomicUsize,
        list_zones_calls: AtomicUsize,
        list_history_calls: AtomicUsize,
        history_added: std::sync::Mutex<Vec<NewHistoryEntry>>,
        categories: std::sync::Mutex<Vec<Category>>,
        category_deletes: std::sync::Mutex<Vec<i64>>,
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "HTTP error! status: 500".into(),
        }
    }

    fn sample(id: i64) -> InventoryObject {
        InventoryObject {
            id,
            name: format!("object-{}", id),
            description: None,
            zone_id: None,
            zone_name: None,
            category_id: None,
            category: None,
            price: 0.0,
            quantity: 0,
            status: "Available".into(),
        }
    }

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn list_objects(&self) -> Result<Vec<InventoryObject>, ApiError> {
            self.list_objects_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists {
                return Err(server_error());
            }
            Ok(vec![sample(1)])
        }

        async fn get_object(&self, id: i64) -> Result<InventoryObject, ApiError> {
            Ok(sample(id))
        }

        async fn create_object(&self, object: &NewObject) -> Result<InventoryObject, ApiError> {
            let mut created = sample(2);
            created.name = object.name.clone();
            Ok(created)
        }

        async fn update_object(&self, id: i64, _update: &ObjectUpdate) -> Result<InventoryObject, ApiError> {
            Ok(sample(id))
        }

        async fn delete_object(&self, id: i64) -> Result<(), ApiError> {
            if self.deleted.lock().unwrap().insert(id) {
                Ok(())
            } else {
                Err(ApiError::Status {
                    status: 404,
                    message: format!("Object {} not found", id),
                })
            }
        }

        async fn delete_all_objects(&self, request: &BulkDeleteRequest) -> Result<BulkDeleteResponse, ApiError> {
            if request.password != "admin" {
                return Err(ApiError::Status {
                    status: 401,
                    message: "Invalid password".into(),
                });
            }
            Ok(BulkDeleteResponse { deleted: 3 })
        }

        async fn delete_zone_objects(
            &self,
            _zone_id: i64,
            _request: &BulkDeleteRequest,
        ) -> Result<BulkDeleteResponse, ApiError> {
            Ok(BulkDeleteResponse { deleted: 1 })
        }

        async fn delete_category_objects(
            &self,
            category_id: i64,
            _request: &BulkDeleteRequest,
        ) -> Result<BulkDeleteResponse, ApiError> {
            self.category_deletes.lock().unwrap().push(category_id);
            Ok(BulkDeleteResponse { deleted: 1 })
        }

        async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
            self.list_zones_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists {
                return Err(server_error());
            }
            Ok(vec![Zone { id: 1, name: "Zona Soldadura".into() }])
        }

        async fn create_zone(&self, zone: &NewZone) -> Result<Zone, ApiError> {
            Ok(Zone { id: 9, name: zone.name.clone() })
        }

        async fn delete_zone(&self, _id: i64) -> Result<(), ApiError> {
            Ok(())
        }

        async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
            let mut categories = self.categories.lock().unwrap();
            let created = Category {
                id: categories.len() as i64 + 7,
                name: category.name.clone(),
            };
            categories.push(created.clone());
            Ok(created)
        }

        async fn list_statuses(&self) -> Result<Vec<Status>, ApiError> {
            Ok(vec![Status { id: 1, name: "Available".into() }])
        }

        async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
            self.list_history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn add_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, ApiError> {
            self.history_added.lock().unwrap().push(entry.clone());
            Ok(HistoryEntry {
                id: 1,
                modification_date: Utc::now(),
                object_id: entry.object_id,
                object_name: None,
                zone_id: entry.zone_id,
                zone_name: None,
                action_type: entry.action_type,
                comment: entry.comment.clone(),
            })
        }
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[tokio::test]
    async fn test_failed_fetch_raises_exactly_one_alert() {
        let api = FakeApi {
            fail_lists: true,
            ..Default::default()
        };
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::Reload(Tab::Objects)).await;

        let app = app.lock().await;
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts.count(AlertKind::Danger), 1);
        let alert = app.alerts.alerts().next().unwrap();
        assert_eq!(alert.message, "Error loading objects: HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_failed_reference_load_raises_one_alert() {
        let api = FakeApi {
            fail_lists: true,
            ..Default::default()
        };
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::LoadReference).await;

        assert_eq!(app.lock().await.alerts.len(), 1);
    }

    #[tokio::test]
    async fn test_tab_switch_reloads_once() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());

        let command = app.lock().await.handle_key(Key::Char('3'));
        assert_eq!(command, Some(Command::Reload(Tab::History)));
        if let Some(command) = command {
            drive(&api, &app, command).await;
        }
        assert_eq!(app.lock().await.handle_key(Key::Char('3')), None);

        assert_eq!(api.list_history_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.list_objects_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zones_tab_refreshes_reference_zones() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::Reload(Tab::Zones)).await;

        assert_eq!(api.list_zones_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.lock().await.reference.zones.len(), 1);
    }

    #[tokio::test]
    async fn test_double_delete_is_not_an_error() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());
        let delete = Command::DeleteObject {
            id: 1,
            name: "object-1".into(),
        };

        drive(&api, &app, delete.clone()).await;
        app.lock().await.modal = None;
        drive(&api, &app, delete).await;

        let app = app.lock().await;
        assert_eq!(app.alerts.count(AlertKind::Danger), 0);
        assert_eq!(app.alerts.count(AlertKind::Success), 1);
        assert_eq!(app.alerts.count(AlertKind::Info), 1);
        assert_eq!(api.list_objects_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_create_reloads_objects() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());

        drive(&api, &app, Command::CreateObject(NewObject::named("Lathe"))).await;

        let app = app.lock().await;
        assert_eq!(api.list_objects_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.objects.len(), 1);
        assert_eq!(app.alerts.count(AlertKind::Success), 1);
    }

    #[tokio::test]
    async fn test_wrong_bulk_password_surfaces_backend_message() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());
        let command = Command::BulkDelete {
            scope: BulkScope::All,
            request: BulkDeleteRequest {
                password: "nope".into(),
                comment: None,
            },
        };

        drive(&api, &app, command).await;

        let app = app.lock().await;
        assert_eq!(app.alerts.len(), 1);
        let alert = app.alerts.alerts().next().unwrap();
        assert_eq!(alert.kind, AlertKind::Danger);
        assert_eq!(alert.message, "Error: Invalid password");
        assert_eq!(api.list_objects_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_created_category_can_scope_bulk_delete() {
        let api = FakeApi::default();
        let app = Mutex::new(App::new());

        drive(
            &api,
            &app,
            Command::CreateCategory(NewCategory { name: "Tools".into() }),
        )
        .await;
        assert_eq!(app.lock().await.reference.category_name(7), Some("Tools"));

        let command = {
            let mut app = app.lock().await;
            app.handle_key(Key::Char('4'));
            app.handle_key(Key::Char('c'));
            app.handle_key(Key::Right);
            app.handle_key(Key::Tab);
            for c in "admin".chars() {
                app.handle_key(Key::Char(c));
            }
            app.handle_key(Key::Enter)
        };
        assert!(matches!(
            command,
            Some(Command::BulkDelete { scope: BulkScope::Category(7), .. })
        ));
        if let Some(command) = command {
            drive(&api, &app, command).await;
        }

        assert_eq!(*api.category_deletes.lock().unwrap(), vec![7]);
        let app = app.lock().await;
        assert_eq!(app.alerts.count(AlertKind::Danger), 0);
        assert_eq!(app.alerts.count(AlertKind::Success), 2);
    }

    #[tokio::test]
    async fn test_zone_delete_appends_history() {
        let api = FakeApi::default();
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

        let added = api.history_added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].zone_id, Some(4));
        assert_eq!(added[0].action_type, ActionType::Delete);
        assert_eq!(api.list_zones_calls.load(Ordering::SeqCst), 1);
    }
}
