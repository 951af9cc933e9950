//! # Inventory Entities
//!
//! Rows as the backend returns them. Optional references are `None` when the
//! row does not point anywhere; display names are resolved by the backend so
//! the console never joins tables itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to objects created without an explicit one.
pub const DEFAULT_STATUS: &str = "Available";

/// Statuses every fresh inventory starts with.
pub const SEED_STATUSES: [&str; 3] = ["Available", "In Use", "Maintenance"];

// =============================================================================
// REFERENCE DATA
// =============================================================================

/// A named grouping that objects belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
}

/// An object classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// An object lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// OBJECTS
// =============================================================================

/// An inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryObject {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    /// Name of the zone, resolved by the backend.
    #[serde(default)]
    pub zone_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Name of the category, resolved by the backend.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

// =============================================================================
// HISTORY
// =============================================================================

/// Kind of change recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Create,
    Delete,
}

impl ActionType {
    /// Wire label (`CREATE` / `DELETE`).
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Create => "CREATE",
            ActionType::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An audit record of a create or delete action.
///
/// `object_name` and `zone_name` are snapshots taken when the entry was
/// written, so they survive deletion of the row they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub modification_date: DateTime<Utc>,
    #[serde(default)]
    pub object_id: Option<i64>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub zone_name: Option<String>,
    pub action_type: ActionType,
    #[serde(default)]
    pub comment: Option<String>,
}
