//! # Request and Response Bodies
//!
//! Payloads for the mutating endpoints plus the uniform error body.

use serde::{Deserialize, Serialize};

use crate::entities::{ActionType, DEFAULT_STATUS};

/// Body of `POST /api/objects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_status")]
    pub status: String,
    /// Stored on the CREATE history entry.
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewObject {
    /// Minimal object with defaults for every optional field.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            zone_id: None,
            category_id: None,
            price: 0.0,
            quantity: 0,
            status: default_status(),
            comment: None,
        }
    }
}

/// Body of `PUT /api/objects/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

/// Body of `POST /api/zones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewZone {
    pub name: String,
}

/// Body of `POST /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// Body of `POST /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHistoryEntry {
    #[serde(default)]
    pub object_id: Option<i64>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    pub action_type: ActionType,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of the password-gated bulk deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub password: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Result of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

/// Acknowledgement returned by single-row deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error body carried by every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}
