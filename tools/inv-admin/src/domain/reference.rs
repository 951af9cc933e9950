//! Reference lists shared by the forms and tables.

use shared_types::{Category, Status, Zone, SEED_STATUSES};

/// Zones, categories and statuses as last fetched.
///
/// Passed explicitly to whatever needs it; there is no global cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub zones: Vec<Zone>,
    pub categories: Vec<Category>,
    pub statuses: Vec<Status>,
}

impl ReferenceData {
    pub fn zone_name(&self, id: i64) -> Option<&str> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .map(|z| z.name.as_str())
    }

    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Status names, falling back to the seed statuses before the first load.
    pub fn status_names(&self) -> Vec<String> {
        if self.statuses.is_empty() {
            SEED_STATUSES.iter().map(|s| s.to_string()).collect()
        } else {
            self.statuses.iter().map(|s| s.name.clone()).collect()
        }
    }
}
