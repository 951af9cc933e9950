//! # Inventory Test Suite
//!
//! End-to-end flows: the console's API client and controller driven against
//! a real backend bound to an ephemeral port.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── harness.rs   # Server spawning helpers
//!     └── flows.rs     # Client and console flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p inv-tests
//! ```

pub mod integration;
