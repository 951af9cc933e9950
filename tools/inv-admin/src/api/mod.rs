//! API client module for the inventory REST backend.
//!
//! [`InventoryApi`] is the port the console controller talks to;
//! [`InventoryClient`] is the HTTP adapter.

mod client;

use async_trait::async_trait;
use shared_types::{
    BulkDeleteRequest, BulkDeleteResponse, Category, HistoryEntry, InventoryObject, NewCategory,
    NewHistoryEntry, NewObject, NewZone, ObjectUpdate, Status, Zone,
};

use crate::domain::ReferenceData;

pub use client::{ApiError, InventoryClient};

/// Calls the console makes against the backend.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_objects(&self) -> Result<Vec<InventoryObject>, ApiError>;

    async fn get_object(&self, id: i64) -> Result<InventoryObject, ApiError>;

    async fn create_object(&self, object: &NewObject) -> Result<InventoryObject, ApiError>;

    async fn update_object(&self, id: i64, update: &ObjectUpdate) -> Result<InventoryObject, ApiError>;

    async fn delete_object(&self, id: i64) -> Result<(), ApiError>;

    async fn delete_all_objects(&self, request: &BulkDeleteRequest) -> Result<BulkDeleteResponse, ApiError>;

    async fn delete_zone_objects(
        &self,
        zone_id: i64,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ApiError>;

    async fn delete_category_objects(
        &self,
        category_id: i64,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ApiError>;

    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError>;

    async fn create_zone(&self, zone: &NewZone) -> Result<Zone, ApiError>;

    async fn delete_zone(&self, id: i64) -> Result<(), ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError>;

    async fn list_statuses(&self) -> Result<Vec<Status>, ApiError>;

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    async fn add_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, ApiError>;
}

/// Fetch zones, categories and statuses concurrently.
///
/// Fails as soon as any of the three calls fails.
pub async fn load_reference_data<A>(api: &A) -> Result<ReferenceData, ApiError>
where
    A: InventoryApi + ?Sized,
{
    let (zones, categories, statuses) =
        tokio::try_join!(api.list_zones(), api.list_categories(), api.list_statuses())?;

    Ok(ReferenceData {
        zones,
        categories,
        statuses,
    })
}
