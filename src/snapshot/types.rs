//! Read-only model of a fetched presentation.
//!
//! Mirrors the subset of the `presentations.get` response the crate walks:
//! slides → page elements → (shape text | image | table | group). Every
//! collection defaults to empty because the service omits empty arrays.

use serde::{Deserialize, Serialize};

use crate::requests::{AffineTransform, CellLocation, Size};

/// A presentation as returned by the service after a batch.
///
/// # Examples
///
/// ```
/// use slidesmith::snapshot::DocumentSnapshot;
///
/// let snapshot: DocumentSnapshot = serde_json::from_str(r#"{
///     "presentationId": "deck1",
///     "revisionId": "rev-9",
///     "slides": [{"objectId": "p", "pageElements": [{"objectId": "g1"}]}]
/// }"#).unwrap();
///
/// assert_eq!(snapshot.slides.len(), 1);
/// assert!(snapshot.slide("p").is_some());
/// assert_eq!(snapshot.revision_id.as_deref(), Some("rev-9"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub presentation_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub revision_id: Option<String>,
    #[serde(default)]
    pub slides: Vec<Page>,
}

impl DocumentSnapshot {
    /// Find a slide by object id.
    pub fn slide(&self, object_id: &str) -> Option<&Page> {
        self.slides.iter().find(|s| s.object_id == object_id)
    }

    /// Every object id in the document: slides, elements and group children.
    pub fn object_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for slide in &self.slides {
            ids.push(slide.object_id.as_str());
            for element in slide.elements() {
                ids.push(element.object_id.as_str());
            }
        }
        ids
    }
}

/// A slide (or any page) and its elements in z-order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub object_id: String,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

impl Page {
    /// Depth-first walk over the elements, group children right after their
    /// group.
    pub fn elements(&self) -> Vec<&PageElement> {
        let mut out = Vec::new();
        for element in &self.page_elements {
            element.collect_into(&mut out);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    pub object_id: String,
    /// Alt-text title; the human readable label templates put on elements
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub transform: Option<AffineTransform>,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub table: Option<Table>,
    #[serde(default)]
    pub element_group: Option<Group>,
}

impl PageElement {
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a PageElement>) {
        out.push(self);
        if let Some(group) = &self.element_group {
            for child in &group.children {
                child.collect_into(out);
            }
        }
    }

    /// Whether the title or description equals `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.title.as_deref() == Some(label) || self.description.as_deref() == Some(label)
    }

    /// Concatenated text of a shape element, `None` for other kinds.
    pub fn shape_text(&self) -> Option<String> {
        self.shape
            .as_ref()
            .and_then(|s| s.text.as_ref())
            .map(TextContent::plain_text)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default)]
    pub shape_type: Option<String>,
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub children: Vec<PageElement>,
}

/// A table: declared dimensions plus the rows the service returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub location: Option<CellLocation>,
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// Text of a shape or cell as a flat list of paragraph markers and runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

impl TextContent {
    /// All run contents in order, without trimming.
    pub fn plain_text(&self) -> String {
        self.text_elements
            .iter()
            .filter_map(|te| te.text_run.as_ref())
            .filter_map(|run| run.content.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default)]
    pub start_index: Option<u32>,
    #[serde(default)]
    pub end_index: Option<u32>,
    #[serde(default)]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default)]
    pub content: Option<String>,
}

impl TextRun {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested_table_and_group() {
        let json = r#"{
            "presentationId": "deck",
            "slides": [{
                "objectId": "slide2",
                "pageElements": [
                    {
                        "objectId": "table_slide2",
                        "table": {
                            "rows": 1,
                            "columns": 2,
                            "tableRows": [{"tableCells": [
                                {"location": {}, "text": {"textElements": [
                                    {"endIndex": 8, "paragraphMarker": {"style": {}}},
                                    {"endIndex": 8, "textRun": {"content": "cliente\n", "style": {}}}
                                ]}},
                                {"location": {"columnIndex": 1}}
                            ]}]
                        }
                    },
                    {
                        "objectId": "grp1",
                        "elementGroup": {"children": [
                            {"objectId": "child1", "title": "Timer 1/4", "shape": {"shapeType": "TEXT_BOX"}}
                        ]}
                    }
                ]
            }]
        }"#;
        let snapshot: DocumentSnapshot = serde_json::from_str(json).unwrap();
        let slide = snapshot.slide("slide2").unwrap();
        let table = slide.page_elements[0].table.as_ref().unwrap();
        assert_eq!(table.table_rows[0].table_cells.len(), 2);
        assert_eq!(table.table_rows[0].table_cells[0].location, Some(CellLocation::new(0, 0)));
        assert_eq!(table.table_rows[0].table_cells[1].location, Some(CellLocation::new(0, 1)));

        let ids: Vec<_> = slide.elements().iter().map(|e| e.object_id.as_str()).collect();
        assert_eq!(ids, vec!["table_slide2", "grp1", "child1"]);
        assert!(slide.elements()[2].has_label("Timer 1/4"));
        assert_eq!(snapshot.object_ids(), vec!["slide2", "table_slide2", "grp1", "child1"]);
    }

    #[test]
    fn test_shape_text_concatenates_runs() {
        let element = PageElement {
            object_id: "title".into(),
            shape: Some(Shape {
                shape_type: Some("TEXT_BOX".into()),
                text: Some(TextContent {
                    text_elements: vec![
                        TextElement {
                            text_run: Some(TextRun::new("REP")),
                            ..Default::default()
                        },
                        TextElement::default(),
                        TextElement {
                            text_run: Some(TextRun::new("ORTE\n")),
                            ..Default::default()
                        },
                    ],
                }),
            }),
            ..Default::default()
        };
        assert_eq!(element.shape_text().as_deref(), Some("REPORTE\n"));
    }
}
