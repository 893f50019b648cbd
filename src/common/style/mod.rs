//! Common style and formatting types.
//!
//! Colors and character styles shared by the edit operations and the
//! deck builders.

// Submodule declarations
pub mod color;
pub mod text;

// Re-exports
pub use color::{OpaqueColor, OptionalColor, RGBColor, RgbFraction};
pub use text::TextStyle;
