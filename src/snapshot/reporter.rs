//! Flattened, human readable trace of a [`DocumentSnapshot`].
//!
//! The trace is an audit trail: the pipeline logs it line by line and nothing
//! downstream parses it.

use super::types::{DocumentSnapshot, PageElement, TableCell};

/// Marker emitted for a slide without page elements.
pub const NO_ELEMENTS: &str = "This slide has no elements.";
/// Marker emitted for a table without rows.
pub const NO_ROWS: &str = "This table has no rows.";

const INDENT: &str = "  ";

/// Trimmed concatenation of every text run in a cell, in run order.
///
/// # Examples
///
/// ```
/// use slidesmith::snapshot::{cell_text, TableCell, TextContent, TextElement, TextRun};
///
/// let cell = TableCell {
///     location: None,
///     text: Some(TextContent {
///         text_elements: vec![
///             TextElement { text_run: Some(TextRun::new("Cliente ")), ..Default::default() },
///             TextElement { text_run: Some(TextRun::new("A")), ..Default::default() },
///         ],
///     }),
/// };
/// assert_eq!(cell_text(&cell), "Cliente A");
/// assert_eq!(cell_text(&TableCell::default()), "");
/// ```
pub fn cell_text(cell: &TableCell) -> String {
    cell.text
        .as_ref()
        .map(|t| t.plain_text().trim().to_string())
        .unwrap_or_default()
}

/// Describe a snapshot as an ordered list of lines.
///
/// Slides come in snapshot order, elements in per-slide order, group
/// children one level deeper right after their group. Tables report their
/// declared size, then every cell row by row, left to right. Never fails:
/// empty slides and row-less tables produce [`NO_ELEMENTS`] and [`NO_ROWS`].
pub fn describe(snapshot: &DocumentSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for slide in &snapshot.slides {
        lines.push(format!("Slide ID: {}", slide.object_id));
        if slide.page_elements.is_empty() {
            lines.push(format!("{}{}", INDENT, NO_ELEMENTS));
            continue;
        }
        for element in &slide.page_elements {
            describe_element(element, 1, &mut lines);
        }
    }
    lines
}

fn describe_element(element: &PageElement, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    match &element.title {
        Some(title) => lines.push(format!("{}Element ID: {} ({})", pad, element.object_id, title)),
        None => lines.push(format!("{}Element ID: {}", pad, element.object_id)),
    }

    if let Some(table) = &element.table {
        let pad = INDENT.repeat(depth + 1);
        lines.push(format!("{}Rows: {}, Columns: {}", pad, table.rows, table.columns));
        if table.table_rows.is_empty() {
            lines.push(format!("{}{}", pad, NO_ROWS));
        }
        let cell_pad = INDENT.repeat(depth + 2);
        for (row_index, row) in table.table_rows.iter().enumerate() {
            for (column_index, cell) in row.table_cells.iter().enumerate() {
                lines.push(format!(
                    "{}Cell [{}, {}] text: \"{}\"",
                    cell_pad,
                    row_index,
                    column_index,
                    cell_text(cell)
                ));
            }
        }
    }

    if let Some(group) = &element.element_group {
        for child in &group.children {
            describe_element(child, depth + 1, lines);
        }
    }
}
