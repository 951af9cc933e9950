//! Commands the console asks the controller to perform, and their outcomes.

use shared_types::{
    BulkDeleteRequest, BulkDeleteResponse, Category, HistoryEntry, InventoryObject, NewCategory,
    NewHistoryEntry, NewObject, NewZone, ObjectUpdate, Zone,
};

use super::{ReferenceData, Tab};
use crate::api::ApiError;

/// Which objects a bulk delete removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkScope {
    All,
    Zone(i64),
    Category(i64),
}

/// One unit of IO.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Reload the data behind a tab.
    Reload(Tab),
    LoadReference,
    /// Fetch an object and open the edit form on it.
    FetchForEdit(i64),
    CreateObject(NewObject),
    UpdateObject { id: i64, update: ObjectUpdate },
    DeleteObject { id: i64, name: String },
    AddHistory(NewHistoryEntry),
    CreateZone(NewZone),
    DeleteZone { id: i64, name: String },
    CreateCategory(NewCategory),
    BulkDelete { scope: BulkScope, request: BulkDeleteRequest },
}

/// Result of one [`Command`].
#[derive(Debug)]
pub enum Outcome {
    Objects(Result<Vec<InventoryObject>, ApiError>),
    Zones(Result<Vec<Zone>, ApiError>),
    History(Result<Vec<HistoryEntry>, ApiError>),
    Reference(Result<ReferenceData, ApiError>),
    ObjectForEdit(Result<InventoryObject, ApiError>),
    ObjectCreated(Result<InventoryObject, ApiError>),
    ObjectUpdated(Result<InventoryObject, ApiError>),
    ObjectDeleted {
        id: i64,
        name: String,
        result: Result<(), ApiError>,
    },
    HistoryAdded(Result<HistoryEntry, ApiError>),
    ZoneCreated(Result<Zone, ApiError>),
    ZoneDeleted {
        id: i64,
        name: String,
        result: Result<(), ApiError>,
    },
    CategoryCreated(Result<Category, ApiError>),
    BulkDeleted {
        scope: BulkScope,
        result: Result<BulkDeleteResponse, ApiError>,
    },
}
