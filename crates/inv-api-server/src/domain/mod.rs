//! Domain layer: configuration, credentials, errors and the inventory store.

pub mod auth;
pub mod config;
pub mod error;
pub mod store;

pub use auth::AdminPassword;
pub use config::{AdminConfig, ConfigError, HttpConfig, SeedConfig, ServerConfig};
pub use error::{ServerError, ServiceError};
pub use store::{InventoryStore, StoreError};
