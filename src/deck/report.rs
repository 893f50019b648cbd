//! Batch construction for decks built from an empty presentation.
//!
//! A report deck is a cover slide, any number of table slides and any number
//! of picture slides, in that order. Ids are derived from the slide number
//! (`slide1`, `title_slide1`, `table_slide2`, ...), so one description always
//! produces the same batch.

use serde::{Deserialize, Serialize};

use crate::common::id::DEFAULT_SLIDE_ID;
use crate::common::unit::SLIDE_WIDTH_PT;
use crate::common::{Error, RGBColor, Result, TextStyle};
use crate::requests::{CellLocation, EditOperation, ElementProperties, PredefinedLayout, validate_batch};

const COVER_TITLE_FONT: &str = "Inter";
const COVER_TITLE_SIZE_PT: f64 = 32.0;
const LOGO_SIZE_PT: f64 = 50.0;
const MARGIN_PT: f64 = 20.0;

/// An image placed at a fixed position, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    pub url: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverSlide {
    pub title: String,
    #[serde(default)]
    pub background_url: Option<String>,
    /// Hex color of the title, white when unset
    #[serde(default)]
    pub title_color: Option<String>,
    #[serde(default)]
    pub images: Vec<PlacedImage>,
}

/// A titled table: one header row followed by the data rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSlide {
    pub title: String,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureSlide {
    pub title: String,
    pub background_url: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Description of a deck built from scratch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportDeck {
    #[serde(default)]
    pub cover: Option<CoverSlide>,
    #[serde(default)]
    pub tables: Vec<TableSlide>,
    #[serde(default)]
    pub pictures: Vec<PictureSlide>,
    /// Remove the slide a new presentation starts with, after the others
    /// have been created
    #[serde(default)]
    pub delete_default_slide: bool,
}

impl ReportDeck {
    pub fn slide_count(&self) -> usize {
        self.cover.iter().count() + self.tables.len() + self.pictures.len()
    }
}

/// Builds the batch for a [`ReportDeck`].
#[derive(Debug, Default)]
pub struct ReportDeckBuilder {
    ops: Vec<EditOperation>,
    next_slide: usize,
}

impl ReportDeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate the batch for `deck`.
    pub fn build(mut self, deck: &ReportDeck) -> Result<Vec<EditOperation>> {
        if deck.delete_default_slide && deck.slide_count() == 0 {
            return Err(Error::InvalidRequest(
                "cannot delete the default slide of a deck without other slides".to_string(),
            ));
        }

        if let Some(cover) = &deck.cover {
            self.cover(cover)?;
        }
        for table in &deck.tables {
            self.table(table)?;
        }
        for picture in &deck.pictures {
            self.picture(picture);
        }
        if deck.delete_default_slide {
            self.ops.push(EditOperation::delete_object(DEFAULT_SLIDE_ID));
        }

        validate_batch(&self.ops, &[DEFAULT_SLIDE_ID])?;
        Ok(self.ops)
    }

    fn new_slide(&mut self) -> String {
        self.next_slide += 1;
        let id = format!("slide{}", self.next_slide);
        self.ops.push(EditOperation::create_slide(&id, PredefinedLayout::Blank));
        id
    }

    fn title_box(&mut self, slide: &str, title: &str, props: ElementProperties) -> String {
        let id = format!("title_{}", slide);
        self.ops.push(EditOperation::text_box(&id, props));
        self.ops.push(EditOperation::insert_text(&id, title));
        id
    }

    fn cover(&mut self, cover: &CoverSlide) -> Result<()> {
        let slide = self.new_slide();
        if let Some(url) = &cover.background_url {
            self.ops.push(EditOperation::set_background_image(&slide, url));
        }

        let color = match &cover.title_color {
            Some(hex) => RGBColor::from_hex(hex)
                .ok_or_else(|| Error::Config(format!("invalid title color '{}'", hex)))?,
            None => RGBColor::WHITE,
        };
        let title = self.title_box(&slide, &cover.title, ElementProperties::at_pt(&slide, 41.0, 138.0, 170.0, 39.0));
        self.ops.push(EditOperation::update_text_style(
            &title,
            TextStyle::new()
                .bold(true)
                .font_family(COVER_TITLE_FONT)
                .font_size_pt(COVER_TITLE_SIZE_PT)
                .foreground(color),
        ));

        for (i, image) in cover.images.iter().enumerate() {
            self.ops.push(EditOperation::create_image(
                format!("image{}_{}", i + 1, slide),
                &image.url,
                ElementProperties::at_pt(&slide, image.x, image.y, image.width, image.height),
            ));
        }
        Ok(())
    }

    fn table(&mut self, table: &TableSlide) -> Result<()> {
        if table.headers.is_empty() {
            return Err(Error::InvalidRequest(format!("table '{}' has no header columns", table.title)));
        }
        let columns = table.headers.len();
        if let Some((i, row)) = table.rows.iter().enumerate().find(|(_, r)| r.len() > columns) {
            return Err(Error::InvalidRequest(format!(
                "row {} of table '{}' has {} cells but only {} columns",
                i + 1,
                table.title,
                row.len(),
                columns
            )));
        }

        let slide = self.new_slide();
        self.title_box(&slide, &table.title, ElementProperties::at_pt(&slide, 50.0, 20.0, 400.0, 50.0));

        let table_id = format!("table_{}", slide);
        self.ops.push(EditOperation::create_table(
            &table_id,
            ElementProperties::at_pt(&slide, 50.0, 100.0, 500.0, 200.0),
            (table.rows.len() + 1) as u32,
            columns as u32,
        ));

        let all_rows = std::iter::once(&table.headers).chain(table.rows.iter());
        for (row_index, row) in all_rows.enumerate() {
            for (column_index, text) in row.iter().enumerate() {
                // insertText rejects empty strings; a blank cell stays blank
                if text.is_empty() {
                    continue;
                }
                self.ops.push(EditOperation::insert_cell_text(
                    &table_id,
                    CellLocation::new(row_index as u32, column_index as u32),
                    text,
                ));
            }
        }
        Ok(())
    }

    fn picture(&mut self, picture: &PictureSlide) {
        let slide = self.new_slide();
        self.ops.push(EditOperation::set_background_image(&slide, &picture.background_url));
        self.title_box(
            &slide,
            &picture.title,
            ElementProperties::at_pt(&slide, MARGIN_PT, MARGIN_PT, 300.0, 50.0),
        );
        if let Some(logo) = &picture.logo_url {
            self.ops.push(EditOperation::create_image(
                format!("logo_{}", slide),
                logo,
                ElementProperties::at_pt(
                    &slide,
                    SLIDE_WIDTH_PT - LOGO_SIZE_PT - MARGIN_PT,
                    MARGIN_PT,
                    LOGO_SIZE_PT,
                    LOGO_SIZE_PT,
                ),
            ));
        }
    }
}
