//! Dropdown options for the form selects.

use crate::domain::ReferenceData;

use super::table::CellText;

/// One choice in a select field.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    /// Row id behind the choice; `None` for the "no selection" entry.
    pub id: Option<i64>,
    pub label: CellText,
}

impl SelectOption {
    pub fn none(label: &str) -> Self {
        Self {
            id: None,
            label: CellText::new(label),
        }
    }

    pub fn new(id: i64, label: &str) -> Self {
        Self {
            id: Some(id),
            label: CellText::new(label),
        }
    }
}

/// Zones, led by a "no selection" entry labelled `placeholder`.
pub fn zone_options(reference: &ReferenceData, placeholder: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::none(placeholder))
        .chain(reference.zones.iter().map(|z| SelectOption::new(z.id, &z.name)))
        .collect()
}

/// Categories, led by a "no selection" entry labelled `placeholder`.
pub fn category_options(reference: &ReferenceData, placeholder: &str) -> Vec<SelectOption> {
    std::iter::once(SelectOption::none(placeholder))
        .chain(
            reference
                .categories
                .iter()
                .map(|c| SelectOption::new(c.id, &c.name)),
        )
        .collect()
}

/// Statuses by name; there is no empty entry.
pub fn status_options(reference: &ReferenceData) -> Vec<SelectOption> {
    if reference.statuses.is_empty() {
        return reference
            .status_names()
            .iter()
            .map(|name| SelectOption {
                id: None,
                label: CellText::new(name),
            })
            .collect();
    }
    reference
        .statuses
        .iter()
        .map(|s| SelectOption::new(s.id, &s.name))
        .collect()
}
