//! Common types and utilities shared across the crate.
//!
//! Errors, units, colors, text styles and object identifier rules used by
//! both the request side and the snapshot side.

// Submodule declarations
pub mod error;
pub mod id;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{OptionalColor, RGBColor, TextStyle};
pub use unit::{Dimension, Unit};
