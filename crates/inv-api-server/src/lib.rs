//! # Inventory API Server
//!
//! REST backend for the inventory console.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/health` | liveness |
//! | GET, POST | `/api/objects` | list / create objects |
//! | GET, PUT, DELETE | `/api/objects/:id` | fetch / update / delete one object |
//! | DELETE | `/api/objects/all` | delete every object (password-gated) |
//! | GET, POST | `/api/zones` | list / create zones |
//! | DELETE | `/api/zones/:id` | delete an empty zone |
//! | DELETE | `/api/zones/:id/objects` | delete a zone's objects (password-gated) |
//! | GET, POST | `/api/categories` | list / create categories |
//! | DELETE | `/api/categories/:id/objects` | delete a category's objects (password-gated) |
//! | GET | `/api/statuses` | list statuses |
//! | GET, POST | `/api/history` | list / append audit entries |
//!
//! Every error response carries `{ "error": message }`.

pub mod domain;
pub mod rest;
pub mod service;

pub use domain::{
    AdminPassword, ConfigError, InventoryStore, ServerConfig, ServerError, ServiceError, StoreError,
};
pub use rest::AppState;
pub use service::{build_router, serve, InventoryService};
