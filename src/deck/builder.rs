//! Batch construction for template runs.

use super::context::DeckContext;
use super::fixup::DuplicationRecord;
use super::layout::TemplateLayout;
use crate::common::Result;
use crate::requests::{EditOperation, validate_batch};

/// Builds the single batch that fills a copied match template.
///
/// The output order is fixed:
///
/// 1. clear-then-write the headline box,
/// 2. clear-then-write the subtitle box,
/// 3. create the appended slide,
/// 4. replace the home logo, then the away logo,
/// 5. duplicate the timer slide.
///
/// Placeholder boxes already carry template text, so each `DeleteText`
/// comes right before the `InsertText` on the same box.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slidesmith::deck::{DeckContext, Team, TemplateDeckBuilder, TemplateLayout};
///
/// let ctx = DeckContext::new(
///     Team::new("Lions", "https://img/lions.png"),
///     Team::new("Tigers", "https://img/tigers.png"),
///     "Cup",
///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
/// )?;
/// let ops = TemplateDeckBuilder::new(TemplateLayout::default()).build(&ctx)?;
/// assert_eq!(ops.len(), 8);
/// # Ok::<(), slidesmith::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateDeckBuilder {
    layout: TemplateLayout,
}

impl TemplateDeckBuilder {
    pub fn new(layout: TemplateLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// The duplication this builder's batch requests.
    pub fn duplication(&self) -> DuplicationRecord {
        DuplicationRecord::new(&self.layout.timer_source_slide, &self.layout.timer_copy_slide)
    }

    /// Build and validate the batch for `ctx`.
    pub fn build(&self, ctx: &DeckContext) -> Result<Vec<EditOperation>> {
        let layout = &self.layout;
        let mut ops = Vec::with_capacity(8);

        ops.extend(replace_text(&layout.headline_box, ctx.headline()));
        ops.extend(replace_text(&layout.subtitle_box, ctx.subtitle()));
        ops.push(EditOperation::create_slide(
            &layout.appended_slide,
            layout.appended_slide_layout,
        ));
        ops.push(EditOperation::replace_image(
            &layout.home_logo,
            &ctx.home.logo,
            layout.logo_replace_method,
        ));
        ops.push(EditOperation::replace_image(
            &layout.away_logo,
            &ctx.away.logo,
            layout.logo_replace_method,
        ));
        ops.push(self.duplication().operation());

        validate_batch(&ops, &layout.existing_ids())?;
        Ok(ops)
    }
}

/// Clear a placeholder box, then write `text` into it.
pub fn replace_text(object_id: &str, text: impl Into<String>) -> [EditOperation; 2] {
    [
        EditOperation::delete_all_text(object_id),
        EditOperation::insert_text(object_id, text),
    ]
}
