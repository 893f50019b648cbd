//! The edit operations a batch is made of.
//!
//! Each [`EditOperation`] variant wraps the request body of one Slides API
//! request kind and serializes to exactly the JSON the API expects, e.g.
//! `{"deleteText": {"objectId": "p2_i7171", "textRange": {"type": "ALL"}}}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::geometry::ElementProperties;
use crate::common::id::{check_new_object_id, check_reference};
use crate::common::style::{OpaqueColor, RGBColor, TextStyle};
use crate::common::{Error, Result};

/// Zero-based cell coordinates inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellLocation {
    /// Omitted by the service when zero
    #[serde(default)]
    pub row_index: u32,
    #[serde(default)]
    pub column_index: u32,
}

impl CellLocation {
    pub const fn new(row_index: u32, column_index: u32) -> Self {
        Self {
            row_index,
            column_index,
        }
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row_index, self.column_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    All,
    FromStartIndex,
    FixedRange,
}

/// Range of text inside a shape or table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    #[serde(rename = "type")]
    pub kind: RangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
}

impl TextRange {
    pub const ALL: TextRange = TextRange {
        kind: RangeType::All,
        start_index: None,
        end_index: None,
    };

    pub const fn from_start(start: u32) -> Self {
        Self {
            kind: RangeType::FromStartIndex,
            start_index: Some(start),
            end_index: None,
        }
    }

    pub const fn fixed(start: u32, end: u32) -> Self {
        Self {
            kind: RangeType::FixedRange,
            start_index: Some(start),
            end_index: Some(end),
        }
    }

    fn check(&self) -> Result<()> {
        match (self.kind, self.start_index, self.end_index) {
            (RangeType::All, _, _) => Ok(()),
            (RangeType::FromStartIndex, Some(_), _) => Ok(()),
            (RangeType::FixedRange, Some(start), Some(end)) if start < end => Ok(()),
            _ => Err(Error::InvalidRequest(format!("malformed text range {:?}", self))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredefinedLayout {
    Blank,
    CaptionOnly,
    Title,
    TitleAndBody,
    TitleAndTwoColumns,
    TitleOnly,
    SectionHeader,
    SectionTitleAndDescription,
    OneColumnText,
    MainPoint,
    BigNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub predefined_layout: PredefinedLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageReplaceMethod {
    /// Scale the new image to fit inside the old bounds
    #[default]
    CenterInside,
    /// Scale and crop the new image to fill the old bounds
    CenterCrop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    /// Left out to let the service pick an id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_layout_reference: Option<LayoutReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchedPictureFill {
    pub content_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    pub color: OpaqueColor,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBackgroundFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretched_picture_fill: Option<StretchedPictureFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProperties {
    pub page_background_fill: PageBackgroundFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePagePropertiesRequest {
    pub object_id: String,
    pub page_properties: PageProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShapeRequest {
    pub object_id: String,
    pub shape_type: ShapeType,
    pub element_properties: ElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub object_id: String,
    pub url: String,
    pub element_properties: ElementProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: ElementProperties,
    pub rows: u32,
    pub columns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTextRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text_range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub style: TextStyle,
    pub text_range: TextRange,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceImageRequest {
    pub image_object_id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_replace_method: Option<ImageReplaceMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateObjectRequest {
    pub object_id: String,
    /// Source id → id the copy should get. Children left out of the map get
    /// service-generated ids.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub object_ids: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// Discriminant of an [`EditOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    CreateSlide,
    UpdatePageProperties,
    CreateShape,
    CreateImage,
    CreateTable,
    InsertText,
    DeleteText,
    UpdateTextStyle,
    ReplaceImage,
    DuplicateObject,
    DeleteObject,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateSlide => "CreateSlide",
            Self::UpdatePageProperties => "UpdatePageProperties",
            Self::CreateShape => "CreateShape",
            Self::CreateImage => "CreateImage",
            Self::CreateTable => "CreateTable",
            Self::InsertText => "InsertText",
            Self::DeleteText => "DeleteText",
            Self::UpdateTextStyle => "UpdateTextStyle",
            Self::ReplaceImage => "ReplaceImage",
            Self::DuplicateObject => "DuplicateObject",
            Self::DeleteObject => "DeleteObject",
        }
    }
}

/// One declarative edit inside a batch.
///
/// Operations are plain values: building them has no side effects, and a
/// batch is applied in exactly the order the operations were built.
///
/// # Examples
///
/// ```
/// use slidesmith::requests::{EditOperation, OperationKind};
///
/// let clear = EditOperation::delete_all_text("p2_i7171");
/// let write = EditOperation::insert_text("p2_i7171", "Lions vs Tigers");
/// assert_eq!(clear.kind(), OperationKind::DeleteText);
/// assert_eq!(write.target_id(), Some("p2_i7171"));
///
/// let json = serde_json::to_value(&clear).unwrap();
/// assert_eq!(json["deleteText"]["textRange"]["type"], "ALL");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOperation {
    CreateSlide(CreateSlideRequest),
    UpdatePageProperties(UpdatePagePropertiesRequest),
    CreateShape(CreateShapeRequest),
    CreateImage(CreateImageRequest),
    CreateTable(CreateTableRequest),
    InsertText(InsertTextRequest),
    DeleteText(DeleteTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    ReplaceImage(ReplaceImageRequest),
    DuplicateObject(DuplicateObjectRequest),
    DeleteObject(DeleteObjectRequest),
}

impl EditOperation {
    /// Create a slide with a predefined layout.
    pub fn create_slide(object_id: impl Into<String>, layout: PredefinedLayout) -> Self {
        EditOperation::CreateSlide(CreateSlideRequest {
            object_id: Some(object_id.into()),
            insertion_index: None,
            slide_layout_reference: Some(LayoutReference {
                predefined_layout: layout,
            }),
        })
    }

    /// Stretch a picture over the whole page background.
    pub fn set_background_image(page_id: impl Into<String>, url: impl Into<String>) -> Self {
        EditOperation::UpdatePageProperties(UpdatePagePropertiesRequest {
            object_id: page_id.into(),
            page_properties: PageProperties {
                page_background_fill: PageBackgroundFill {
                    stretched_picture_fill: Some(StretchedPictureFill {
                        content_url: url.into(),
                    }),
                    solid_fill: None,
                },
            },
            fields: "pageBackgroundFill".to_string(),
        })
    }

    /// Fill the page background with a solid color.
    pub fn set_background_color(page_id: impl Into<String>, color: RGBColor) -> Self {
        let fill = color
            .to_optional_color()
            .opaque_color
            .map(|color| SolidFill { color });
        EditOperation::UpdatePageProperties(UpdatePagePropertiesRequest {
            object_id: page_id.into(),
            page_properties: PageProperties {
                page_background_fill: PageBackgroundFill {
                    stretched_picture_fill: None,
                    solid_fill: fill,
                },
            },
            fields: "pageBackgroundFill.solidFill.color".to_string(),
        })
    }

    pub fn create_shape(
        object_id: impl Into<String>,
        shape_type: ShapeType,
        element_properties: ElementProperties,
    ) -> Self {
        EditOperation::CreateShape(CreateShapeRequest {
            object_id: object_id.into(),
            shape_type,
            element_properties,
        })
    }

    /// Shorthand for a `TEXT_BOX` shape.
    pub fn text_box(object_id: impl Into<String>, element_properties: ElementProperties) -> Self {
        Self::create_shape(object_id, ShapeType::TextBox, element_properties)
    }

    pub fn create_image(
        object_id: impl Into<String>,
        url: impl Into<String>,
        element_properties: ElementProperties,
    ) -> Self {
        EditOperation::CreateImage(CreateImageRequest {
            object_id: object_id.into(),
            url: url.into(),
            element_properties,
        })
    }

    pub fn create_table(
        object_id: impl Into<String>,
        element_properties: ElementProperties,
        rows: u32,
        columns: u32,
    ) -> Self {
        EditOperation::CreateTable(CreateTableRequest {
            object_id: object_id.into(),
            element_properties,
            rows,
            columns,
        })
    }

    /// Insert text at the start of a shape.
    pub fn insert_text(object_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::insert_text_at(object_id, text, 0)
    }

    pub fn insert_text_at(object_id: impl Into<String>, text: impl Into<String>, index: u32) -> Self {
        EditOperation::InsertText(InsertTextRequest {
            object_id: object_id.into(),
            cell_location: None,
            text: text.into(),
            insertion_index: Some(index),
        })
    }

    /// Insert text into one cell of a table.
    pub fn insert_cell_text(
        table_id: impl Into<String>,
        cell: CellLocation,
        text: impl Into<String>,
    ) -> Self {
        EditOperation::InsertText(InsertTextRequest {
            object_id: table_id.into(),
            cell_location: Some(cell),
            text: text.into(),
            insertion_index: None,
        })
    }

    /// Clear all text of a shape.
    pub fn delete_all_text(object_id: impl Into<String>) -> Self {
        EditOperation::DeleteText(DeleteTextRequest {
            object_id: object_id.into(),
            cell_location: None,
            text_range: TextRange::ALL,
        })
    }

    /// Style all text of a shape; the field mask follows the style.
    pub fn update_text_style(object_id: impl Into<String>, style: TextStyle) -> Self {
        let fields = style.fields();
        EditOperation::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.into(),
            cell_location: None,
            style,
            text_range: TextRange::ALL,
            fields,
        })
    }

    pub fn replace_image(
        image_object_id: impl Into<String>,
        url: impl Into<String>,
        method: ImageReplaceMethod,
    ) -> Self {
        EditOperation::ReplaceImage(ReplaceImageRequest {
            image_object_id: image_object_id.into(),
            url: url.into(),
            image_replace_method: Some(method),
        })
    }

    /// Duplicate a slide or element, giving the copy of `object_id` the id
    /// `copy_id`.
    pub fn duplicate(object_id: impl Into<String>, copy_id: impl Into<String>) -> Self {
        let object_id = object_id.into();
        let mut object_ids = BTreeMap::new();
        object_ids.insert(object_id.clone(), copy_id.into());
        EditOperation::DuplicateObject(DuplicateObjectRequest {
            object_id,
            object_ids,
        })
    }

    pub fn delete_object(object_id: impl Into<String>) -> Self {
        EditOperation::DeleteObject(DeleteObjectRequest {
            object_id: object_id.into(),
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            EditOperation::CreateSlide(_) => OperationKind::CreateSlide,
            EditOperation::UpdatePageProperties(_) => OperationKind::UpdatePageProperties,
            EditOperation::CreateShape(_) => OperationKind::CreateShape,
            EditOperation::CreateImage(_) => OperationKind::CreateImage,
            EditOperation::CreateTable(_) => OperationKind::CreateTable,
            EditOperation::InsertText(_) => OperationKind::InsertText,
            EditOperation::DeleteText(_) => OperationKind::DeleteText,
            EditOperation::UpdateTextStyle(_) => OperationKind::UpdateTextStyle,
            EditOperation::ReplaceImage(_) => OperationKind::ReplaceImage,
            EditOperation::DuplicateObject(_) => OperationKind::DuplicateObject,
            EditOperation::DeleteObject(_) => OperationKind::DeleteObject,
        }
    }

    /// The object the operation acts on or creates.
    ///
    /// `None` only for a `CreateSlide` that lets the service pick the id.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            EditOperation::CreateSlide(r) => r.object_id.as_deref(),
            EditOperation::UpdatePageProperties(r) => Some(&r.object_id),
            EditOperation::CreateShape(r) => Some(&r.object_id),
            EditOperation::CreateImage(r) => Some(&r.object_id),
            EditOperation::CreateTable(r) => Some(&r.object_id),
            EditOperation::InsertText(r) => Some(&r.object_id),
            EditOperation::DeleteText(r) => Some(&r.object_id),
            EditOperation::UpdateTextStyle(r) => Some(&r.object_id),
            EditOperation::ReplaceImage(r) => Some(&r.image_object_id),
            EditOperation::DuplicateObject(r) => Some(&r.object_id),
            EditOperation::DeleteObject(r) => Some(&r.object_id),
        }
    }

    /// Ids this operation brings into existence.
    pub fn created_ids(&self) -> Vec<&str> {
        match self {
            EditOperation::CreateSlide(r) => r.object_id.as_deref().into_iter().collect(),
            EditOperation::CreateShape(r) => vec![r.object_id.as_str()],
            EditOperation::CreateImage(r) => vec![r.object_id.as_str()],
            EditOperation::CreateTable(r) => vec![r.object_id.as_str()],
            EditOperation::DuplicateObject(r) => r.object_ids.values().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Ids that must already exist when this operation runs.
    pub fn referenced_ids(&self) -> Vec<&str> {
        match self {
            EditOperation::CreateSlide(_) => Vec::new(),
            EditOperation::CreateShape(r) => vec![r.element_properties.page_object_id.as_str()],
            EditOperation::CreateImage(r) => vec![r.element_properties.page_object_id.as_str()],
            EditOperation::CreateTable(r) => vec![r.element_properties.page_object_id.as_str()],
            other => other.target_id().into_iter().collect(),
        }
    }

    /// Check the operation on its own: ids, geometry, counts and payload.
    pub fn validate(&self) -> Result<()> {
        let what = self.kind().as_str();
        for id in self.created_ids() {
            check_new_object_id(id, what)?;
        }
        for id in self.referenced_ids() {
            check_reference(id, what)?;
        }

        match self {
            EditOperation::CreateSlide(_) | EditOperation::DeleteObject(_) => {},
            EditOperation::UpdatePageProperties(r) => {
                let fill = &r.page_properties.page_background_fill;
                if let Some(picture) = &fill.stretched_picture_fill {
                    check_url(&picture.content_url, what)?;
                }
                check_non_empty(&r.fields, "field mask", what)?;
            },
            EditOperation::CreateShape(r) => check_geometry(&r.element_properties, what)?,
            EditOperation::CreateImage(r) => {
                check_url(&r.url, what)?;
                check_geometry(&r.element_properties, what)?;
            },
            EditOperation::CreateTable(r) => {
                check_geometry(&r.element_properties, what)?;
                if r.rows < 1 || r.columns < 1 {
                    return Err(Error::InvalidRequest(format!(
                        "{} '{}' needs at least one row and one column, got {}x{}",
                        what, r.object_id, r.rows, r.columns
                    )));
                }
            },
            EditOperation::InsertText(r) => check_non_empty(&r.text, "text", what)?,
            EditOperation::DeleteText(r) => r.text_range.check()?,
            EditOperation::UpdateTextStyle(r) => {
                r.text_range.check()?;
                check_non_empty(&r.fields, "field mask", what)?;
            },
            EditOperation::ReplaceImage(r) => check_url(&r.url, what)?,
            EditOperation::DuplicateObject(r) => {
                for source in r.object_ids.keys() {
                    check_reference(source, what)?;
                }
            },
        }
        Ok(())
    }
}

fn check_non_empty(value: &str, field: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidRequest(format!("{} has an empty {}", what, field)));
    }
    Ok(())
}

fn check_url(url: &str, what: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::InvalidRequest(format!("{} has an empty URL", what)));
    }
    Ok(())
}

fn check_geometry(props: &ElementProperties, what: &str) -> Result<()> {
    if !props.is_non_negative() {
        return Err(Error::InvalidRequest(format!(
            "{} on page '{}' has negative geometry",
            what, props.page_object_id
        )));
    }
    Ok(())
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind().as_str();
        match self {
            EditOperation::InsertText(r) => match r.cell_location {
                Some(cell) => write!(f, "{}({} {}, {:?})", kind, r.object_id, cell, r.text),
                None => write!(f, "{}({}, {:?})", kind, r.object_id, r.text),
            },
            EditOperation::ReplaceImage(r) => write!(f, "{}({} <- {})", kind, r.image_object_id, r.url),
            EditOperation::DuplicateObject(r) => {
                let copies: Vec<_> = r.object_ids.iter().map(|(k, v)| format!("{}->{}", k, v)).collect();
                write!(f, "{}({})", kind, copies.join(", "))
            },
            other => match other.target_id() {
                Some(id) => write!(f, "{}({})", kind, id),
                None => write!(f, "{}", kind),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_slide_wire_format() {
        let op = EditOperation::create_slide("slide1", PredefinedLayout::Blank);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"createSlide": {"objectId": "slide1", "slideLayoutReference": {"predefinedLayout": "BLANK"}}})
        );
    }

    #[test]
    fn test_background_and_cell_text_wire_format() {
        let op = EditOperation::set_background_image("slide3", "https://fakeimg.pl/800x600?text=partido");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"updatePageProperties": {
                "objectId": "slide3",
                "pageProperties": {"pageBackgroundFill": {"stretchedPictureFill": {
                    "contentUrl": "https://fakeimg.pl/800x600?text=partido"
                }}},
                "fields": "pageBackgroundFill"
            }})
        );

        let op = EditOperation::insert_cell_text("table_slide2", CellLocation::new(1, 0), "Cliente A");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"insertText": {
                "objectId": "table_slide2",
                "cellLocation": {"rowIndex": 1, "columnIndex": 0},
                "text": "Cliente A"
            }})
        );
    }

    #[test]
    fn test_solid_background_targets_fill_color() {
        let op = EditOperation::set_background_color("slide4", RGBColor::BLACK);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"updatePageProperties": {
                "objectId": "slide4",
                "pageProperties": {"pageBackgroundFill": {"solidFill": {"color": {
                    "rgbColor": {"red": 0.0, "green": 0.0, "blue": 0.0}
                }}}},
                "fields": "pageBackgroundFill.solidFill.color"
            }})
        );
        assert_eq!(op.kind(), OperationKind::UpdatePageProperties);
        assert_eq!(op.target_id(), Some("slide4"));
    }

    #[test]
    fn test_replace_and_duplicate_wire_format() {
        let op = EditOperation::replace_image("p2_i7173", "https://img/u1.png", ImageReplaceMethod::CenterInside);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"replaceImage": {
                "imageObjectId": "p2_i7173",
                "url": "https://img/u1.png",
                "imageReplaceMethod": "CENTER_INSIDE"
            }})
        );

        let op = EditOperation::duplicate("p7", "p7_copy1");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"duplicateObject": {"objectId": "p7", "objectIds": {"p7": "p7_copy1"}}})
        );
        assert_eq!(op.created_ids(), vec!["p7_copy1"]);
        assert_eq!(op.referenced_ids(), vec!["p7"]);
    }

    #[test]
    fn test_text_style_carries_matching_mask() {
        let style = TextStyle::new().bold(true).font_family("Inter");
        let op = EditOperation::update_text_style("title_slide1", style);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["updateTextStyle"]["fields"], "bold,fontFamily");
        assert_eq!(json["updateTextStyle"]["textRange"], json!({"type": "ALL"}));
    }

    #[test]
    fn test_deserialize_round_trip_keeps_variant() {
        let op = EditOperation::delete_all_text("p2_i7172");
        let text = serde_json::to_string(&op).unwrap();
        let back: EditOperation = serde_json::from_str(&text).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn test_validate_rejects_bad_operations() {
        let props = ElementProperties::at_pt("slide2", 50.0, 100.0, 500.0, 200.0);
        assert!(EditOperation::create_table("table_slide2", props.clone(), 6, 3).validate().is_ok());
        assert!(matches!(
            EditOperation::create_table("table_slide2", props.clone(), 0, 3).validate(),
            Err(Error::InvalidRequest(_))
        ));
        assert!(EditOperation::create_image("logo", "https://x", props.clone()).validate().is_err());
        assert!(EditOperation::create_image("logo_1", "", props).validate().is_err());
        assert!(EditOperation::insert_text("", "x").validate().is_err());
        assert!(EditOperation::insert_text("p2_i7171", "").validate().is_err());
        assert!(EditOperation::replace_image("p2_i7173", " ", ImageReplaceMethod::CenterCrop)
            .validate()
            .is_err());
        let negative = ElementProperties::at_pt("slide1", 10.0, -5.0, 10.0, 10.0);
        assert!(EditOperation::text_box("title_slide1", negative).validate().is_err());
    }

    #[test]
    fn test_text_range_checks() {
        assert!(TextRange::fixed(2, 5).check().is_ok());
        assert!(TextRange::fixed(5, 5).check().is_err());
        assert!(TextRange::from_start(3).check().is_ok());
    }

    #[test]
    fn test_display_is_compact() {
        assert_eq!(EditOperation::delete_all_text("p2_i7171").to_string(), "DeleteText(p2_i7171)");
        assert_eq!(
            EditOperation::insert_text("xyz", "25:00").to_string(),
            "InsertText(xyz, \"25:00\")"
        );
        assert_eq!(
            EditOperation::duplicate("p7", "p7_copy1").to_string(),
            "DuplicateObject(p7->p7_copy1)"
        );
    }
}
