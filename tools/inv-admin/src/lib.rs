//! Inventory Admin: terminal console for the inventory REST backend.
//!
//! ## Architecture
//!
//! ```text
//! key press ──► App::handle_key ──► Command ──► worker ──► perform(api)
//!                    ▲                                        │
//!                    │                                     Outcome
//!                    │                                        ▼
//!                 ui::render ◄──────────── App::apply ──► follow-up Commands
//! ```
//!
//! - `api`: HTTP client and the [`api::InventoryApi`] port
//! - `domain`: state, tabs, forms, alerts and the command controller
//! - `view`: table and dropdown models built from fetched lists
//! - `ui`: ratatui rendering

pub mod api;
pub mod domain;
pub mod ui;
pub mod view;

pub use api::{ApiError, InventoryApi, InventoryClient};
pub use domain::{App, AppState, Command, Key, Outcome, Tab};
