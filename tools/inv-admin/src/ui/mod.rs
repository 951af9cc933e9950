//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Main layout orchestration
//! - `tables.rs`: Tab bodies
//! - `modal.rs`: Form and confirmation dialogs
//! - `widgets/`: Reusable UI components

mod layout;
mod modal;
mod tables;

pub mod widgets;

pub use layout::render;
