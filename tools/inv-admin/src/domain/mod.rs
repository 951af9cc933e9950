//! Domain models for the console.

mod alert;
mod app;
mod command;
mod controller;
mod form;
mod modal;
mod reference;
mod tab;

pub use alert::{Alert, AlertBanner, AlertKind, DEFAULT_ALERT_TTL, DEFAULT_MAX_ALERTS};
pub use app::{App, AppState, Key};
pub use command::{BulkScope, Command, Outcome};
pub use controller::{drive, perform};
pub use form::{BulkTarget, Field, FieldKind, Form, FormError, FormKind};
pub use modal::{Confirm, Modal};
pub use reference::ReferenceData;
pub use tab::{Tab, TabController};
