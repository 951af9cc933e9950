//! HTTP client for the inventory REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared_types::{
    BulkDeleteRequest, BulkDeleteResponse, Category, ErrorBody, HistoryEntry, InventoryObject,
    MessageBody, NewCategory, NewHistoryEntry, NewObject, NewZone, ObjectUpdate, Status, Zone,
};
use thiserror::Error;
use tracing::{debug, warn};

use super::InventoryApi;

/// Errors that can occur when talking to the inventory API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    /// Non-2xx response; `message` comes from the body's `error` field when present.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build the error for a non-2xx response body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()));
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// The server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// Inventory API client.
pub struct InventoryClient {
    client: Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request to `/api/{endpoint}`.
    ///
    /// Returns the parsed JSON body on 2xx. A single attempt is made; there is
    /// no retry.
    pub async fn fetch_api<B, R>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        debug!(%method, %url, "API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(format!("Cannot connect to {}", self.base_url))
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status, &text);
            warn!(%method, %url, status = status.as_u16(), error = %err, "API request failed");
            return Err(err);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        self.fetch_api::<(), R>(Method::GET, endpoint, None).await
    }
}

#[async_trait]
impl InventoryApi for InventoryClient {
    async fn list_objects(&self) -> Result<Vec<InventoryObject>, ApiError> {
        self.get("objects").await
    }

    async fn get_object(&self, id: i64) -> Result<InventoryObject, ApiError> {
        self.get(&format!("objects/{}", id)).await
    }

    async fn create_object(&self, object: &NewObject) -> Result<InventoryObject, ApiError> {
        self.fetch_api(Method::POST, "objects", Some(object)).await
    }

    async fn update_object(&self, id: i64, update: &ObjectUpdate) -> Result<InventoryObject, ApiError> {
        self.fetch_api(Method::PUT, &format!("objects/{}", id), Some(update))
            .await
    }

    async fn delete_object(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_api::<(), MessageBody>(Method::DELETE, &format!("objects/{}", id), None)
            .await
            .map(|_| ())
    }

    async fn delete_all_objects(&self, request: &BulkDeleteRequest) -> Result<BulkDeleteResponse, ApiError> {
        self.fetch_api(Method::DELETE, "objects/all", Some(request))
            .await
    }

    async fn delete_zone_objects(
        &self,
        zone_id: i64,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ApiError> {
        self.fetch_api(Method::DELETE, &format!("zones/{}/objects", zone_id), Some(request))
            .await
    }

    async fn delete_category_objects(
        &self,
        category_id: i64,
        request: &BulkDeleteRequest,
    ) -> Result<BulkDeleteResponse, ApiError> {
        self.fetch_api(
            Method::DELETE,
            &format!("categories/{}/objects", category_id),
            Some(request),
        )
        .await
    }

    async fn list_zones(&self) -> Result<Vec<Zone>, ApiError> {
        self.get("zones").await
    }

    async fn create_zone(&self, zone: &NewZone) -> Result<Zone, ApiError> {
        self.fetch_api(Method::POST, "zones", Some(zone)).await
    }

    async fn delete_zone(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_api::<(), MessageBody>(Method::DELETE, &format!("zones/{}", id), None)
            .await
            .map(|_| ())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("categories").await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        self.fetch_api(Method::POST, "categories", Some(category))
            .await
    }

    async fn list_statuses(&self) -> Result<Vec<Status>, ApiError> {
        self.get("statuses").await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.get("history").await
    }

    async fn add_history(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, ApiError> {
        self.fetch_api(Method::POST, "history", Some(entry)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_error_field() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error": "Please enter a name"}"#);
        assert_eq!(err.to_string(), "Please enter a name");
    }

    #[test]
    fn test_status_error_falls_back_to_status_code() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 500");

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, r#"{"detail": "upstream"}"#);
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(ApiError::from_status(StatusCode::NOT_FOUND, "").is_not_found());
        assert!(!ApiError::Parse("x".into()).is_not_found());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = InventoryClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
