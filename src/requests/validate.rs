//! Whole-batch checks run before a batch is submitted.

use std::collections::{HashMap, HashSet};

use super::operation::EditOperation;
use crate::common::{Error, Result};

/// Check every operation, then check that each referenced id was created
/// earlier in the batch or is already present in the document.
///
/// `existing_ids` are the ids known to be in the document before the batch
/// runs (template placeholders, the default slide of a new presentation).
/// Also rejects ids created twice, references to ids deleted earlier in the
/// batch, and cell locations outside a table created in the same batch.
///
/// # Examples
///
/// ```
/// use slidesmith::requests::{validate_batch, EditOperation, ElementProperties, PredefinedLayout};
///
/// let ops = vec![
///     EditOperation::create_slide("slide2", PredefinedLayout::Blank),
///     EditOperation::text_box("title_slide2", ElementProperties::at_pt("slide2", 50.0, 20.0, 400.0, 50.0)),
///     EditOperation::insert_text("title_slide2", "Primer Tiempo"),
/// ];
/// assert!(validate_batch(&ops, &[] as &[&str]).is_ok());
///
/// // Writing into a box nobody created is caught before the service sees it
/// let bad = vec![EditOperation::insert_text("ghost_box", "x")];
/// assert!(validate_batch(&bad, &[] as &[&str]).is_err());
/// ```
pub fn validate_batch<S: AsRef<str>>(operations: &[EditOperation], existing_ids: &[S]) -> Result<()> {
    let mut live: HashSet<&str> = existing_ids.iter().map(AsRef::as_ref).collect();
    let mut deleted: HashSet<&str> = HashSet::new();
    let mut tables: HashMap<&str, (u32, u32)> = HashMap::new();

    for (index, op) in operations.iter().enumerate() {
        op.validate()
            .map_err(|e| Error::InvalidRequest(format!("operation #{} {}: {}", index, op, e)))?;

        for id in op.referenced_ids() {
            if !live.contains(id) {
                let reason = if deleted.contains(id) {
                    "was deleted earlier in the batch"
                } else {
                    "is neither created earlier in the batch nor present in the document"
                };
                return Err(Error::InvalidRequest(format!(
                    "operation #{} {} references '{}' which {}",
                    index, op, id, reason
                )));
            }
        }

        if let EditOperation::InsertText(r) = op {
            if let (Some(cell), Some((rows, columns))) = (r.cell_location, tables.get(r.object_id.as_str())) {
                if cell.row_index >= *rows || cell.column_index >= *columns {
                    return Err(Error::InvalidRequest(format!(
                        "operation #{} {} addresses cell {} outside a {}x{} table",
                        index, op, cell, rows, columns
                    )));
                }
            }
        }

        for id in op.created_ids() {
            if !live.insert(id) {
                return Err(Error::InvalidRequest(format!(
                    "operation #{} {} creates '{}' which already exists",
                    index, op, id
                )));
            }
            deleted.remove(id);
        }

        match op {
            EditOperation::CreateTable(r) => {
                tables.insert(r.object_id.as_str(), (r.rows, r.columns));
            },
            EditOperation::DeleteObject(r) => {
                live.remove(r.object_id.as_str());
                tables.remove(r.object_id.as_str());
                deleted.insert(r.object_id.as_str());
            },
            _ => {},
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{CellLocation, ElementProperties, PredefinedLayout};

    fn table_ops() -> Vec<EditOperation> {
        vec![
            EditOperation::create_slide("slide2", PredefinedLayout::Blank),
            EditOperation::create_table(
                "table_slide2",
                ElementProperties::at_pt("slide2", 50.0, 100.0, 500.0, 200.0),
                2,
                3,
            ),
        ]
    }

    #[test]
    fn test_template_ids_count_as_existing() {
        let ops = vec![
            EditOperation::delete_all_text("p2_i7171"),
            EditOperation::insert_text("p2_i7171", "Lions vs Tigers"),
            EditOperation::duplicate("p7", "p7_copy1"),
        ];
        assert!(validate_batch(&ops, &["p2_i7171", "p7"]).is_ok());
        assert!(validate_batch(&ops, &["p2_i7171"]).is_err());
    }

    #[test]
    fn test_reference_before_creation_is_rejected() {
        let mut ops = table_ops();
        ops.insert(0, EditOperation::insert_cell_text("table_slide2", CellLocation::new(0, 0), "x"));
        let err = validate_batch(&ops, &[] as &[&str]).unwrap_err();
        assert!(err.to_string().contains("table_slide2"));
    }

    #[test]
    fn test_cell_bounds_follow_created_table() {
        let mut ops = table_ops();
        ops.push(EditOperation::insert_cell_text("table_slide2", CellLocation::new(1, 2), "ok"));
        assert!(validate_batch(&ops, &[] as &[&str]).is_ok());

        ops.push(EditOperation::insert_cell_text("table_slide2", CellLocation::new(2, 0), "out"));
        assert!(validate_batch(&ops, &[] as &[&str]).is_err());
    }

    #[test]
    fn test_duplicate_creation_and_deleted_reference() {
        let twice = vec![
            EditOperation::create_slide("slide1", PredefinedLayout::Blank),
            EditOperation::create_slide("slide1", PredefinedLayout::Blank),
        ];
        assert!(validate_batch(&twice, &[] as &[&str]).is_err());

        let after_delete = vec![
            EditOperation::delete_object("p"),
            EditOperation::set_background_image("p", "https://bg"),
        ];
        let err = validate_batch(&after_delete, &["p"]).unwrap_err();
        assert!(err.to_string().contains("deleted"));
    }
}
