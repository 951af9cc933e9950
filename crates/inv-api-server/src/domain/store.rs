//! In-memory inventory store.
//!
//! All tables live behind one `RwLock`, so multi-row operations (a bulk
//! delete and the history entry describing it) are applied atomically.
//!
//! ## Invariants
//!
//! - Names are non-empty after trimming.
//! - `price` is finite and non-negative, `quantity` non-negative.
//! - An object's status names an existing status; its zone and category ids
//!   reference existing rows.
//! - A zone that still holds objects cannot be deleted.
//! - Zone names are unique, and so are category names.
//! - History entries snapshot object and zone names when written.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};

use shared_types::{
    ActionType, Category, HistoryEntry, InventoryObject, NewCategory, NewHistoryEntry, NewObject,
    NewZone, ObjectUpdate, Status, Zone,
};

use super::config::SeedConfig;

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Referenced row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Operation would break referential integrity.
    #[error("{0}")]
    Conflict(String),
}

/// Stored object row; names are resolved on read.
#[derive(Debug, Clone)]
struct ObjectRow {
    id: i64,
    name: String,
    description: Option<String>,
    zone_id: Option<i64>,
    category_id: Option<i64>,
    price: f64,
    quantity: i64,
    status: String,
}

#[derive(Debug, Default)]
struct Sequences {
    object: i64,
    zone: i64,
    category: i64,
    status: i64,
    history: i64,
}

impl Sequences {
    fn next(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug, Default)]
struct Tables {
    seq: Sequences,
    objects: BTreeMap<i64, ObjectRow>,
    zones: BTreeMap<i64, Zone>,
    categories: BTreeMap<i64, Category>,
    statuses: BTreeMap<i64, Status>,
    history: Vec<HistoryEntry>,
    /// Names of deleted rows, kept for history snapshots.
    retired_zone_names: HashMap<i64, String>,
    retired_object_names: HashMap<i64, String>,
}

/// The inventory database.
#[derive(Debug, Default)]
pub struct InventoryStore {
    tables: RwLock<Tables>,
}

impl InventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with seed rows.
    pub fn seeded(seed: &SeedConfig) -> Self {
        let store = Self::new();
        if seed.enabled {
            let mut t = store.tables.write();
            for name in &seed.statuses {
                let id = Sequences::next(&mut t.seq.status);
                t.statuses.insert(id, Status { id, name: name.clone() });
            }
            for name in &seed.zones {
                let id = Sequences::next(&mut t.seq.zone);
                t.zones.insert(id, Zone { id, name: name.clone() });
            }
            for name in &seed.categories {
                let id = Sequences::next(&mut t.seq.category);
                t.categories.insert(id, Category { id, name: name.clone() });
            }
            info!(
                zones = t.zones.len(),
                categories = t.categories.len(),
                statuses = t.statuses.len(),
                "Seeded inventory store"
            );
        }
        store
    }

    // =========================================================================
    // OBJECTS
    // =========================================================================

    pub fn list_objects(&self) -> Vec<InventoryObject> {
        let t = self.tables.read();
        t.objects.values().map(|row| t.resolve(row)).collect()
    }

    pub fn get_object(&self, id: i64) -> Result<InventoryObject, StoreError> {
        let t = self.tables.read();
        t.objects
            .get(&id)
            .map(|row| t.resolve(row))
            .ok_or(StoreError::NotFound { entity: "Object", id })
    }

    /// Insert an object and record a CREATE history entry carrying the comment.
    pub fn create_object(&self, new: NewObject) -> Result<InventoryObject, StoreError> {
        let mut t = self.tables.write();
        let comment = normalize(new.comment.clone());
        let fields = ObjectUpdate {
            name: new.name,
            description: new.description,
            zone_id: new.zone_id,
            category_id: new.category_id,
            price: new.price,
            quantity: new.quantity,
            status: new.status,
        };
        t.validate_object(&fields)?;

        let id = Sequences::next(&mut t.seq.object);
        let row = ObjectRow::from_fields(id, fields);
        let zone_id = row.zone_id;
        t.objects.insert(id, row);
        t.record(NewHistoryEntry {
            object_id: Some(id),
            zone_id,
            action_type: ActionType::Create,
            comment,
        });

        debug!(object_id = id, "Created object");
        Ok(t.resolve(&t.objects[&id]))
    }

    pub fn update_object(&self, id: i64, update: ObjectUpdate) -> Result<InventoryObject, StoreError> {
        let mut t = self.tables.write();
        if !t.objects.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Object", id });
        }
        t.validate_object(&update)?;
        t.objects.insert(id, ObjectRow::from_fields(id, update));

        debug!(object_id = id, "Updated object");
        Ok(t.resolve(&t.objects[&id]))
    }

    pub fn delete_object(&self, id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.write();
        let row = t
            .objects
            .remove(&id)
            .ok_or(StoreError::NotFound { entity: "Object", id })?;
        t.retired_object_names.insert(id, row.name);

        debug!(object_id = id, "Deleted object");
        Ok(())
    }

    /// Delete every object. Returns the number removed.
    pub fn delete_all_objects(&self, comment: Option<String>) -> usize {
        let mut t = self.tables.write();
        let deleted = t.retire_objects(|_| true);
        let comment = normalize(comment).or_else(|| Some(format!("Deleted all objects ({})", deleted)));
        t.record(NewHistoryEntry {
            object_id: None,
            zone_id: None,
            action_type: ActionType::Delete,
            comment,
        });
        info!(deleted, "Deleted all objects");
        deleted
    }

    /// Delete every object in a zone. Returns the number removed.
    pub fn delete_objects_in_zone(&self, zone_id: i64, comment: Option<String>) -> Result<usize, StoreError> {
        let mut t = self.tables.write();
        if !t.zones.contains_key(&zone_id) {
            return Err(StoreError::NotFound { entity: "Zone", id: zone_id });
        }
        let zone_name = t.zones.get(&zone_id).map(|z| z.name.clone()).unwrap_or_default();
        let deleted = t.retire_objects(|row| row.zone_id == Some(zone_id));
        let comment = normalize(comment)
            .or_else(|| Some(format!("Deleted {} objects in zone {}", deleted, zone_name)));
        t.record(NewHistoryEntry {
            object_id: None,
            zone_id: Some(zone_id),
            action_type: ActionType::Delete,
            comment,
        });
        info!(zone_id, deleted, "Deleted zone objects");
        Ok(deleted)
    }

    /// Delete every object in a category. Returns the number removed.
    pub fn delete_objects_in_category(
        &self,
        category_id: i64,
        comment: Option<String>,
    ) -> Result<usize, StoreError> {
        let mut t = self.tables.write();
        let category_name = t
            .categories
            .get(&category_id)
            .map(|c| c.name.clone())
            .ok_or(StoreError::NotFound { entity: "Category", id: category_id })?;
        let deleted = t.retire_objects(|row| row.category_id == Some(category_id));
        let comment = normalize(comment)
            .or_else(|| Some(format!("Deleted {} objects in category {}", deleted, category_name)));
        t.record(NewHistoryEntry {
            object_id: None,
            zone_id: None,
            action_type: ActionType::Delete,
            comment,
        });
        info!(category_id, deleted, "Deleted category objects");
        Ok(deleted)
    }

    // =========================================================================
    // ZONES, CATEGORIES, STATUSES
    // =========================================================================

    pub fn list_zones(&self) -> Vec<Zone> {
        self.tables.read().zones.values().cloned().collect()
    }

    pub fn create_zone(&self, new: NewZone) -> Result<Zone, StoreError> {
        let name = required_name(&new.name, "zone name")?;
        let mut t = self.tables.write();
        if t.zones.values().any(|z| z.name == name) {
            return Err(StoreError::Conflict("A zone with this name already exists".into()));
        }
        let id = Sequences::next(&mut t.seq.zone);
        let zone = Zone { id, name };
        t.zones.insert(id, zone.clone());
        debug!(zone_id = id, "Created zone");
        Ok(zone)
    }

    /// Delete an empty zone.
    pub fn delete_zone(&self, id: i64) -> Result<(), StoreError> {
        let mut t = self.tables.write();
        if !t.zones.contains_key(&id) {
            return Err(StoreError::NotFound { entity: "Zone", id });
        }
        let live = t.objects.values().filter(|o| o.zone_id == Some(id)).count();
        if live > 0 {
            return Err(StoreError::Conflict(format!(
                "Zone {} still has {} objects",
                id, live
            )));
        }
        if let Some(zone) = t.zones.remove(&id) {
            t.retired_zone_names.insert(id, zone.name);
        }
        debug!(zone_id = id, "Deleted zone");
        Ok(())
    }

    pub fn list_categories(&self) -> Vec<Category> {
        self.tables.read().categories.values().cloned().collect()
    }

    pub fn create_category(&self, new: NewCategory) -> Result<Category, StoreError> {
        let name = required_name(&new.name, "category name")?;
        let mut t = self.tables.write();
        if t.categories.values().any(|c| c.name == name) {
            return Err(StoreError::Conflict(
                "A category with this name already exists".into(),
            ));
        }
        let id = Sequences::next(&mut t.seq.category);
        let category = Category { id, name };
        t.categories.insert(id, category.clone());
        Ok(category)
    }

    pub fn list_statuses(&self) -> Vec<Status> {
        self.tables.read().statuses.values().cloned().collect()
    }

    // =========================================================================
    // HISTORY
    // =========================================================================

    /// History, newest first.
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        let t = self.tables.read();
        t.history.iter().rev().cloned().collect()
    }

    pub fn append_history(&self, entry: NewHistoryEntry) -> HistoryEntry {
        let mut t = self.tables.write();
        t.record(entry)
    }
}

impl Tables {
    fn resolve(&self, row: &ObjectRow) -> InventoryObject {
        InventoryObject {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            zone_id: row.zone_id,
            zone_name: row.zone_id.and_then(|id| self.zones.get(&id)).map(|z| z.name.clone()),
            category_id: row.category_id,
            category: row
                .category_id
                .and_then(|id| self.categories.get(&id))
                .map(|c| c.name.clone()),
            price: row.price,
            quantity: row.quantity,
            status: row.status.clone(),
        }
    }

    fn validate_object(&self, fields: &ObjectUpdate) -> Result<(), StoreError> {
        required_name(&fields.name, "name")?;
        if !fields.price.is_finite() || fields.price < 0.0 {
            return Err(StoreError::Validation("Price must be a non-negative number".into()));
        }
        if fields.quantity < 0 {
            return Err(StoreError::Validation("Quantity cannot be negative".into()));
        }
        if !self.statuses.values().any(|s| s.name == fields.status) {
            return Err(StoreError::Validation(format!("Unknown status: {}", fields.status)));
        }
        if let Some(zone_id) = fields.zone_id {
            if !self.zones.contains_key(&zone_id) {
                return Err(StoreError::Validation(format!("Zone {} does not exist", zone_id)));
            }
        }
        if let Some(category_id) = fields.category_id {
            if !self.categories.contains_key(&category_id) {
                return Err(StoreError::Validation(format!(
                    "Category {} does not exist",
                    category_id
                )));
            }
        }
        Ok(())
    }

    /// Remove matching objects, remembering their names. Returns the count.
    fn retire_objects<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&ObjectRow) -> bool,
    {
        let ids: Vec<i64> = self
            .objects
            .values()
            .filter(|row| predicate(row))
            .map(|row| row.id)
            .collect();
        for id in &ids {
            if let Some(row) = self.objects.remove(id) {
                self.retired_object_names.insert(*id, row.name);
            }
        }
        ids.len()
    }

    fn record(&mut self, entry: NewHistoryEntry) -> HistoryEntry {
        let id = Sequences::next(&mut self.seq.history);
        let object_name = entry.object_id.and_then(|oid| {
            self.objects
                .get(&oid)
                .map(|o| o.name.clone())
                .or_else(|| self.retired_object_names.get(&oid).cloned())
        });
        let zone_name = entry.zone_id.and_then(|zid| {
            self.zones
                .get(&zid)
                .map(|z| z.name.clone())
                .or_else(|| self.retired_zone_names.get(&zid).cloned())
        });
        let stored = HistoryEntry {
            id,
            modification_date: Utc::now(),
            object_id: entry.object_id,
            object_name,
            zone_id: entry.zone_id,
            zone_name,
            action_type: entry.action_type,
            comment: normalize(entry.comment),
        };
        self.history.push(stored.clone());
        stored
    }
}

impl ObjectRow {
    fn from_fields(id: i64, fields: ObjectUpdate) -> Self {
        Self {
            id,
            name: fields.name.trim().to_string(),
            description: normalize(fields.description),
            zone_id: fields.zone_id,
            category_id: fields.category_id,
            price: fields.price,
            quantity: fields.quantity,
            status: fields.status,
        }
    }
}

fn required_name(name: &str, what: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("Please enter a {}", what)));
    }
    Ok(trimmed.to_string())
}

/// Blank strings are stored as absent.
fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
