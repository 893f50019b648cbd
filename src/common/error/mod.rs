//! Unified error types for slidesmith.
//!
//! This module provides a single error type that covers the presentation
//! service, the file service and local validation, presenting a consistent
//! API to callers.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
