//! Fetched document state and its structural trace.
//!
//! A [`DocumentSnapshot`] is fetched fresh after every batch and never
//! mutated locally; it is the only source of service-generated ids.

// Submodule declarations
mod reporter;
mod types;

// Re-exports
pub use reporter::{NO_ELEMENTS, NO_ROWS, cell_text, describe};
pub use types::{
    DocumentSnapshot, Group, Image, Page, PageElement, Shape, Table, TableCell, TableRow,
    TextContent, TextElement, TextRun,
};
