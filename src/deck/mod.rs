//! Deck population: turning typed input into ordered edit batches.
//!
//! Two ways to produce a deck:
//!
//! - [`TemplateDeckBuilder`] fills a copied match template from a
//!   [`DeckContext`] and requests a duplicate of the timer slide, which the
//!   [`DuplicationFixup`] patches once the copy's element ids are known.
//! - [`ReportDeckBuilder`] lays out a [`ReportDeck`] on an empty
//!   presentation.
//!
//! Builders are pure: they never talk to the service.

// Submodule declarations
mod builder;
mod context;
mod fixup;
mod layout;
mod report;

// Re-exports
pub use builder::{TemplateDeckBuilder, replace_text};
pub use context::{DeckContext, Team};
pub use fixup::{DuplicationFixup, DuplicationRecord, FixupState};
pub use layout::TemplateLayout;
pub use report::{CoverSlide, PictureSlide, PlacedImage, ReportDeck, ReportDeckBuilder, TableSlide};
