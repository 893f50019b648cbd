//! Edit operations and their validation.
//!
//! A batch is an ordered `Vec<EditOperation>`. The types in this module map
//! one to one onto the Slides API request kinds, so a batch serializes
//! directly into the `requests` array of a `batchUpdate` call.

// Submodule declarations
mod geometry;
mod operation;
mod validate;

// Re-exports
pub use geometry::{AffineTransform, ElementProperties, Size};
pub use operation::{
    CellLocation, CreateImageRequest, CreateShapeRequest, CreateSlideRequest, CreateTableRequest,
    DeleteObjectRequest, DeleteTextRequest, DuplicateObjectRequest, EditOperation,
    ImageReplaceMethod, InsertTextRequest, LayoutReference, OperationKind, PageBackgroundFill,
    PageProperties, PredefinedLayout, RangeType, ReplaceImageRequest, ShapeType, SolidFill,
    StretchedPictureFill, TextRange, UpdatePagePropertiesRequest, UpdateTextStyleRequest,
};
pub use validate::validate_batch;
