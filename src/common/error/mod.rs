//! Unified error types for slidemark.
//!
//! This module provides a unified error type that encompasses errors from the
//! packaging, presentation and conversion layers, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
