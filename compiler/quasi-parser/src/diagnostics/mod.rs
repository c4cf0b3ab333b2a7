//! Template parser diagnostics.
pub mod error;
pub mod expected;
