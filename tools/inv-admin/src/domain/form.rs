//! Modal forms: field editing, validation and submission.
//!
//! A form validates its own fields and turns them into the [`Command`] to
//! run. Validation failures never leave the form; the message is kept on it
//! and shown inside the modal.

use shared_types::{
    ActionType, BulkDeleteRequest, InventoryObject, NewCategory, NewHistoryEntry, NewObject,
    NewZone, ObjectUpdate,
};
use thiserror::Error;

use super::{BulkScope, Command, ReferenceData};
use crate::view::{category_options, status_options, zone_options, SelectOption};

/// Validation failures, worded for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a {0}")]
    Missing(&'static str),
    #[error("Please enter the password")]
    MissingPassword,
    #[error("Please select a {0}")]
    NotSelected(&'static str),
    #[error("Please enter a valid {0}")]
    InvalidNumber(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Text drawn masked.
    Secret,
    Decimal,
    Integer,
    Select {
        options: Vec<SelectOption>,
        selected: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl Field {
    fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            value: String::new(),
        }
    }

    fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    fn select(key: &'static str, label: &'static str, options: Vec<SelectOption>) -> Self {
        Self::new(key, label, FieldKind::Select { options, selected: 0 })
    }

    fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Preselect the first option satisfying `pred`.
    fn preselect(mut self, pred: impl Fn(&SelectOption) -> bool) -> Self {
        if let FieldKind::Select { options, selected } = &mut self.kind {
            if let Some(index) = options.iter().position(pred) {
                *selected = index;
            }
        }
        self
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select { .. })
    }

    /// Text as drawn: masked for secrets, the option label for selects.
    pub fn display(&self) -> String {
        match &self.kind {
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Select { options, selected } => options
                .get(*selected)
                .map(|o| o.label.to_string())
                .unwrap_or_default(),
            _ => self.value.clone(),
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
            FieldKind::Decimal => c.is_ascii_digit() || c == '.',
            FieldKind::Integer => c.is_ascii_digit(),
            FieldKind::Select { .. } => false,
        }
    }
}

/// Which bulk delete a [`FormKind::BulkDelete`] form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTarget {
    All,
    Zone,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreateObject,
    EditObject { id: i64 },
    CreateZone,
    CreateCategory,
    /// Optional comment recorded after an object was deleted.
    DeleteComment { object_id: i64 },
    BulkDelete(BulkTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    fn new(kind: FormKind, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields,
            focus: 0,
            error: None,
        }
    }

    /// Add-object form.
    pub fn create_object(reference: &ReferenceData) -> Self {
        let mut fields = object_fields(reference);
        fields.push(Field::text("comment", "Comment"));
        Self::new(FormKind::CreateObject, "Add New Object", fields)
    }

    /// Edit form pre-filled from `object`.
    pub fn edit_object(reference: &ReferenceData, object: &InventoryObject) -> Self {
        let fields = object_fields(reference)
            .into_iter()
            .map(|field| match field.key {
                "name" => field.with_value(object.name.clone()),
                "description" => field.with_value(object.description.clone().unwrap_or_default()),
                "zone" => field.preselect(|o| o.id.is_some() && o.id == object.zone_id),
                "category" => field.preselect(|o| o.id.is_some() && o.id == object.category_id),
                "price" => field.with_value(object.price.to_string()),
                "quantity" => field.with_value(object.quantity.to_string()),
                "status" => field.preselect(|o| o.label.as_str() == object.status),
                _ => field,
            })
            .collect();
        Self::new(
            FormKind::EditObject { id: object.id },
            format!("Edit Object #{}", object.id),
            fields,
        )
    }

    pub fn create_zone() -> Self {
        Self::new(
            FormKind::CreateZone,
            "Add New Zone",
            vec![Field::text("name", "Zone Name")],
        )
    }

    pub fn create_category() -> Self {
        Self::new(
            FormKind::CreateCategory,
            "Add New Category",
            vec![Field::text("name", "Category Name")],
        )
    }

    pub fn delete_comment(object_id: i64, object_name: &str) -> Self {
        Self::new(
            FormKind::DeleteComment { object_id },
            format!("Comment on deleting '{}'? (Esc to skip)", object_name),
            vec![Field::text("comment", "Comment")],
        )
    }

    pub fn bulk_delete(target: BulkTarget, reference: &ReferenceData) -> Self {
        let (title, mut fields) = match target {
            BulkTarget::All => ("Delete All Objects", Vec::new()),
            BulkTarget::Zone => (
                "Delete Objects by Zone",
                vec![Field::select("zone", "Zone", zone_options(reference, "Select Zone"))],
            ),
            BulkTarget::Category => (
                "Delete Objects by Category",
                vec![Field::select(
                    "category",
                    "Category",
                    category_options(reference, "Select Category"),
                )],
            ),
        };
        fields.push(Field::new("password", "Admin Password", FieldKind::Secret));
        fields.push(Field::text("comment", "Comment"));
        Self::new(FormKind::BulkDelete(target), title, fields)
    }

    // =========================================================================
    // EDITING
    // =========================================================================

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.accepts(c) {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    /// Move the focused select by `step` options, wrapping.
    pub fn cycle(&mut self, step: isize) {
        if let Some(Field {
            kind: FieldKind::Select { options, selected },
            ..
        }) = self.fields.get_mut(self.focus)
        {
            let len = options.len() as isize;
            if len > 0 {
                *selected = (*selected as isize + step).rem_euclid(len) as usize;
            }
        }
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn text(&self, key: &str) -> String {
        self.field(key)
            .map(|f| f.value.trim().to_string())
            .unwrap_or_default()
    }

    fn optional_text(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|s| !s.is_empty())
    }

    fn selected(&self, key: &str) -> Option<&SelectOption> {
        match &self.field(key)?.kind {
            FieldKind::Select { options, selected } => options.get(*selected),
            _ => None,
        }
    }

    fn selected_id(&self, key: &str) -> Option<i64> {
        self.selected(key).and_then(|o| o.id)
    }

    /// Empty means zero.
    fn number<T: std::str::FromStr + Default>(&self, key: &'static str) -> Result<T, FormError> {
        let raw = self.text(key);
        if raw.is_empty() {
            return Ok(T::default());
        }
        raw.parse().map_err(|_| FormError::InvalidNumber(key))
    }

    fn required(&self, key: &str, what: &'static str) -> Result<String, FormError> {
        let value = self.text(key);
        if value.is_empty() {
            return Err(FormError::Missing(what));
        }
        Ok(value)
    }

    /// Validate and build the command. On error the message is kept on the
    /// form and nothing is returned.
    pub fn submit(&mut self) -> Option<Command> {
        match self.to_command() {
            Ok(command) => {
                self.error = None;
                Some(command)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn to_command(&self) -> Result<Command, FormError> {
        match self.kind {
            FormKind::CreateObject => {
                let update = self.object_update()?;
                Ok(Command::CreateObject(NewObject {
                    name: update.name,
                    description: update.description,
                    zone_id: update.zone_id,
                    category_id: update.category_id,
                    price: update.price,
                    quantity: update.quantity,
                    status: update.status,
                    comment: self.optional_text("comment"),
                }))
            }
            FormKind::EditObject { id } => Ok(Command::UpdateObject {
                id,
                update: self.object_update()?,
            }),
            FormKind::CreateZone => Ok(Command::CreateZone(NewZone {
                name: self.required("name", "zone name")?,
            })),
            FormKind::CreateCategory => Ok(Command::CreateCategory(NewCategory {
                name: self.required("name", "category name")?,
            })),
            FormKind::DeleteComment { object_id } => Ok(Command::AddHistory(NewHistoryEntry {
                object_id: Some(object_id),
                zone_id: None,
                action_type: ActionType::Delete,
                comment: Some(self.required("comment", "comment")?),
            })),
            FormKind::BulkDelete(target) => {
                let scope = match target {
                    BulkTarget::All => BulkScope::All,
                    BulkTarget::Zone => BulkScope::Zone(
                        self.selected_id("zone")
                            .ok_or(FormError::NotSelected("zone"))?,
                    ),
                    BulkTarget::Category => BulkScope::Category(
                        self.selected_id("category")
                            .ok_or(FormError::NotSelected("category"))?,
                    ),
                };
                let password = self.field("password").map(|f| f.value.clone()).unwrap_or_default();
                if password.is_empty() {
                    return Err(FormError::MissingPassword);
                }
                Ok(Command::BulkDelete {
                    scope,
                    request: BulkDeleteRequest {
                        password,
                        comment: self.optional_text("comment"),
                    },
                })
            }
        }
    }

    fn object_update(&self) -> Result<ObjectUpdate, FormError> {
        Ok(ObjectUpdate {
            name: self.required("name", "name")?,
            description: self.optional_text("description"),
            zone_id: self.selected_id("zone"),
            category_id: self.selected_id("category"),
            price: self.number("price")?,
            quantity: self.number("quantity")?,
            status: self
                .selected("status")
                .map(|o| o.label.to_string())
                .unwrap_or_else(|| shared_types::DEFAULT_STATUS.to_string()),
        })
    }
}

fn object_fields(reference: &ReferenceData) -> Vec<Field> {
    vec![
        Field::text("name", "Name"),
        Field::text("description", "Description"),
        Field::select("zone", "Zone", zone_options(reference, "Select Zone")),
        Field::select(
            "category",
            "Category",
            category_options(reference, "Select Category"),
        ),
        Field::new("price", "Price", FieldKind::Decimal),
        Field::new("quantity", "Quantity", FieldKind::Integer),
        Field::select("status", "Status", status_options(reference)),
    ]
}
