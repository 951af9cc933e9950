//! Cross-crate integration tests.

pub mod harness;

mod flows;
