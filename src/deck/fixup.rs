//! Patching an element inside a duplicated slide.
//!
//! `duplicateObject` only lets the caller choose the id of the copied slide;
//! the elements inside the copy get ids generated by the service and the
//! batch reply does not list them. The flow therefore re-fetches the
//! document, finds the element by its label and patches it with a second,
//! small batch:
//!
//! ```text
//! Requested --batch ok--> Duplicated --fetch + label found--> Located --patch ok--> Patched
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::common::{Error, Result};
use crate::requests::EditOperation;
use crate::service::{BatchResult, OperationExecutor, PresentationService};
use crate::snapshot::DocumentSnapshot;

/// A slide duplication: known source id → caller-chosen id of the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicationRecord {
    pub source_slide_id: String,
    pub duplicate_slide_id: String,
}

impl DuplicationRecord {
    pub fn new(source: impl Into<String>, duplicate: impl Into<String>) -> Self {
        Self {
            source_slide_id: source.into(),
            duplicate_slide_id: duplicate.into(),
        }
    }

    /// The `DuplicateObject` operation requesting this copy.
    pub fn operation(&self) -> EditOperation {
        EditOperation::duplicate(&self.source_slide_id, &self.duplicate_slide_id)
    }
}

/// Progress of a [`DuplicationFixup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupState {
    Requested,
    Duplicated,
    Located { element_id: String },
    Patched { element_id: String },
}

impl fmt::Display for FixupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixupState::Requested => f.write_str("Requested"),
            FixupState::Duplicated => f.write_str("Duplicated"),
            FixupState::Located { element_id } => write!(f, "Located({})", element_id),
            FixupState::Patched { element_id } => write!(f, "Patched({})", element_id),
        }
    }
}

/// Locate an element by label inside a duplicated slide and rewrite its text.
///
/// # Examples
///
/// ```
/// use slidesmith::deck::{DuplicationFixup, DuplicationRecord, FixupState};
///
/// let fixup = DuplicationFixup::new(DuplicationRecord::new("p7", "p7_copy1"), "Timer 1/4", "25:00");
/// assert_eq!(*fixup.state(), FixupState::Requested);
/// assert!(fixup.patch_operations().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DuplicationFixup {
    record: DuplicationRecord,
    label: String,
    text: String,
    state: FixupState,
}

impl DuplicationFixup {
    pub fn new(record: DuplicationRecord, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            record,
            label: label.into(),
            text: text.into(),
            state: FixupState::Requested,
        }
    }

    pub fn state(&self) -> &FixupState {
        &self.state
    }

    pub fn record(&self) -> &DuplicationRecord {
        &self.record
    }

    /// Record that the batch carrying the `DuplicateObject` succeeded.
    pub fn mark_duplicated(&mut self, result: &BatchResult) -> Result<()> {
        self.require_state(matches!(self.state, FixupState::Requested), "mark_duplicated")?;

        match result.duplicated_object_id() {
            Some(id) if id == self.record.duplicate_slide_id => {
                debug!(duplicate = id, "duplicate confirmed by batch reply");
            },
            Some(id) => warn!(
                expected = %self.record.duplicate_slide_id,
                actual = id,
                "batch reply names a different duplicate"
            ),
            None => debug!("batch reply carries no duplicateObject entry"),
        }

        self.state = FixupState::Duplicated;
        Ok(())
    }

    /// Scan the duplicate slide of a freshly fetched snapshot for the label.
    ///
    /// A missing duplicate slide or a missing label is a [`Error::NotFound`];
    /// the state stays `Duplicated` so nothing gets patched.
    pub fn locate(&mut self, snapshot: &DocumentSnapshot) -> Result<String> {
        self.require_state(matches!(self.state, FixupState::Duplicated), "locate")?;

        let slide = snapshot.slide(&self.record.duplicate_slide_id).ok_or_else(|| {
            Error::NotFound(format!(
                "duplicate slide '{}' is not in presentation '{}'",
                self.record.duplicate_slide_id, snapshot.presentation_id
            ))
        })?;

        let element = slide
            .elements()
            .into_iter()
            .find(|e| e.has_label(&self.label))
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "no element labeled '{}' on duplicate slide '{}'",
                    self.label, self.record.duplicate_slide_id
                ))
            })?;

        info!(label = %self.label, element = %element.object_id, "located element in duplicate");
        let element_id = element.object_id.clone();
        self.state = FixupState::Located {
            element_id: element_id.clone(),
        };
        Ok(element_id)
    }

    /// The patch batch: clear the located element, then write the new text.
    pub fn patch_operations(&self) -> Result<Vec<EditOperation>> {
        match &self.state {
            FixupState::Located { element_id } => Ok(vec![
                EditOperation::delete_all_text(element_id),
                EditOperation::insert_text_at(element_id, &self.text, 0),
            ]),
            other => Err(Error::InvalidState(format!(
                "patch_operations needs a located element, fix-up is {}",
                other
            ))),
        }
    }

    /// Record that the patch batch succeeded.
    pub fn mark_patched(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, FixupState::Requested) {
            FixupState::Located { element_id } => {
                self.state = FixupState::Patched { element_id };
                Ok(())
            },
            other => {
                let err = Error::InvalidState(format!("mark_patched on fix-up in state {}", other));
                self.state = other;
                Err(err)
            },
        }
    }

    /// Drive Duplicated → Patched: fetch, locate, apply the patch batch.
    ///
    /// Returns the id of the patched element. No patch batch is submitted
    /// when the label cannot be found.
    pub async fn run<S>(&mut self, executor: &mut OperationExecutor<'_, S>, document_id: &str) -> Result<String>
    where
        S: PresentationService + ?Sized,
    {
        let snapshot = executor.fetch(document_id).await?;
        self.locate(&snapshot)?;
        let ops = self.patch_operations()?;
        executor.apply(document_id, &ops).await?;
        self.mark_patched()?;

        match &self.state {
            FixupState::Patched { element_id } => Ok(element_id.clone()),
            other => Err(Error::InvalidState(format!("fix-up ended in state {}", other))),
        }
    }

    fn require_state(&self, ok: bool, step: &str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidState(format!("{} on fix-up in state {}", step, self.state)))
        }
    }
}
