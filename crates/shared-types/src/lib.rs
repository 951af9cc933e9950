//! # Shared Types Crate
//!
//! Entities and request bodies exchanged between `inv-api-server` and the
//! `inv-admin` console.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: both sides of the wire import these types, so
//!   the JSON contract cannot drift between client and server.
//! - **Names by value**: an object's status travels as the status name
//!   (`"Available"`, `"In Use"`, ...), zones and categories travel by id.
//! - **Uniform errors**: every non-2xx response carries an [`ErrorBody`].

pub mod entities;
pub mod requests;

pub use entities::*;
pub use requests::*;
